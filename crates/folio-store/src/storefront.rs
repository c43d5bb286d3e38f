//! # Storefront
//!
//! One value that owns every store and repository, and the operations that
//! span more than one of them.
//!
//! ## Cross-Store Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Storefront Coordination                              │
//! │                                                                         │
//! │  login / register / logout / withdraw                                   │
//! │       │                                                                 │
//! │       ├──► SessionStore (identity changes)                              │
//! │       └──► CartStore.clear()  if a signed-in id changed or ended        │
//! │            (a guest cart carries into the first sign-in)                │
//! │                                                                         │
//! │  checkout()                                                             │
//! │       │  requires: signed in, cart not empty                            │
//! │       ├──► PurchaseRepository.append(user, items, now)                  │
//! │       └──► CartStore.clear()                                            │
//! │            (two independent writes, no rollback)                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use folio_core::clock::Clock;
use folio_core::{BookId, PurchaseRecord, User, UserId, UserPatch};
use tracing::info;

use crate::cart::CartStore;
use crate::catalog::CatalogStore;
use crate::error::{StoreError, StoreResult};
use crate::kv::SharedKv;
use crate::repository::{PurchaseRepository, ReviewRepository};
use crate::session::SessionStore;

#[derive(Debug)]
pub struct Storefront {
    clock: Arc<dyn Clock>,
    session: SessionStore,
    catalog: CatalogStore,
    cart: CartStore,
    reviews: ReviewRepository,
    purchases: PurchaseRepository,
}

impl Storefront {
    /// Restores the session from `kv` and seeds the catalog.
    pub fn open(kv: SharedKv, clock: Arc<dyn Clock>) -> Self {
        let session = SessionStore::load(Arc::clone(&kv), Arc::clone(&clock));
        let catalog = CatalogStore::seeded(Arc::clone(&clock));

        Storefront {
            session,
            catalog,
            cart: CartStore::new(),
            reviews: ReviewRepository::new(Arc::clone(&kv)),
            purchases: PurchaseRepository::new(kv),
            clock,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn catalog(&self) -> &CatalogStore {
        &self.catalog
    }

    pub fn catalog_mut(&mut self) -> &mut CatalogStore {
        &mut self.catalog
    }

    pub fn cart(&self) -> &CartStore {
        &self.cart
    }

    pub fn cart_mut(&mut self) -> &mut CartStore {
        &mut self.cart
    }

    pub fn reviews(&self) -> &ReviewRepository {
        &self.reviews
    }

    pub fn purchases(&self) -> &PurchaseRepository {
        &self.purchases
    }

    // =========================================================================
    // Session (cart follows identity)
    // =========================================================================

    pub fn login(&mut self, email: &str, password: &str) -> StoreResult<User> {
        let before = self.current_user_id();
        let user = self.session.login(email, password)?;
        self.scope_cart(before);
        Ok(user)
    }

    pub fn register(&mut self, email: &str, password: &str, name: &str) -> StoreResult<User> {
        let before = self.current_user_id();
        let user = self.session.register(email, password, name)?;
        self.scope_cart(before);
        Ok(user)
    }

    pub fn logout(&mut self) -> StoreResult<()> {
        let before = self.current_user_id();
        self.session.logout()?;
        self.scope_cart(before);
        Ok(())
    }

    pub fn withdraw(&mut self) -> StoreResult<()> {
        let before = self.current_user_id();
        self.session.withdraw()?;
        self.scope_cart(before);
        Ok(())
    }

    pub fn update_user(&mut self, patch: UserPatch) -> StoreResult<User> {
        self.session.update_user(patch)
    }

    fn current_user_id(&self) -> Option<UserId> {
        self.session.current().map(|u| u.id)
    }

    fn scope_cart(&mut self, before: Option<UserId>) {
        if before.is_some() && self.current_user_id() != before && !self.cart.is_empty() {
            info!("Session identity changed, clearing cart");
            self.cart.clear();
        }
    }

    // =========================================================================
    // Cart
    // =========================================================================

    /// Adds a catalog book to the cart. Returns `false` for an unknown id.
    pub fn add_to_cart(&mut self, book_id: BookId, quantity: u32) -> bool {
        let Some(book) = self.catalog.get(book_id) else {
            return false;
        };
        self.cart.add(book, quantity);
        true
    }

    /// Records the cart as purchases for the current user, then empties it.
    ///
    /// ## Errors
    /// - [`StoreError::NotAuthenticated`] without a session
    /// - [`StoreError::EmptyCart`] with nothing to buy
    pub fn checkout(&mut self) -> StoreResult<Vec<PurchaseRecord>> {
        let user_id = self.session.require_user()?.id;
        if self.cart.is_empty() {
            return Err(StoreError::EmptyCart);
        }

        let total = self.cart.total_price();
        let records = self
            .purchases
            .append(user_id, self.cart.items(), self.clock.now())?;
        self.cart.clear();

        info!(user_id, lines = records.len(), total = total.won(), "Checked out");
        Ok(records)
    }
}
