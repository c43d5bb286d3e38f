//! # Seed Catalog
//!
//! The fixed dataset the catalog starts from. There is no load or fetch
//! step: every process begins with exactly these records, and admin edits
//! are lost on restart.
//!
//! ## Shape
//! Twelve books spread across the categories, with distinct stock levels
//! so the popular view has a clear order, and publish dates spanning
//! two years so the new arrivals window has something to select.

use chrono::NaiveDate;

use crate::money::Money;
use crate::types::{Book, BookId, Category};

/// (id, title, author, publisher, category, price, stock, isbn, date, description)
type SeedRow = (
    BookId,
    &'static str,
    &'static str,
    &'static str,
    Category,
    i64,
    u32,
    &'static str,
    (i32, u32, u32),
    &'static str,
);

const SEED_ROWS: &[SeedRow] = &[
    (
        1,
        "달빛 서점의 밤",
        "이서윤",
        "푸른숲",
        Category::Fiction,
        15_000,
        24,
        "9788901000011",
        (2024, 11, 15),
        "문을 닫은 뒤에만 열리는 작은 서점에서 벌어지는 일곱 개의 이야기.",
    ),
    (
        2,
        "러스트로 만드는 시스템",
        "박지훈",
        "한빛미디어",
        Category::Computing,
        32_000,
        6,
        "9791169210027",
        (2025, 2, 3),
        "소유권과 빌림으로 안전한 시스템 프로그램을 설계하는 실전 안내서.",
    ),
    (
        3,
        "오늘도 천천히",
        "김하늘",
        "문학동네",
        Category::Essay,
        13_500,
        31,
        "9788954600033",
        (2023, 9, 20),
        "서두르지 않는 하루를 기록한 산문집.",
    ),
    (
        4,
        "작은 습관의 힘",
        "정민수",
        "웅진지식하우스",
        Category::SelfHelp,
        16_800,
        12,
        "9788901000042",
        (2024, 6, 1),
        "매일 1퍼센트씩 나아지는 습관 설계법.",
    ),
    (
        5,
        "돈의 흐름을 읽는 법",
        "최유진",
        "다산북스",
        Category::Business,
        18_000,
        9,
        "9791130600051",
        (2024, 12, 10),
        "금리와 환율로 읽는 경제 기초 체력.",
    ),
    (
        6,
        "생각의 역사",
        "한도윤",
        "민음사",
        Category::Humanities,
        22_000,
        17,
        "9788937400062",
        (2023, 4, 18),
        "고대 철학에서 현대 인지과학까지, 인간이 생각해 온 방식의 연대기.",
    ),
    (
        7,
        "우주는 어떻게 시작되었나",
        "윤서진",
        "사이언스북스",
        Category::Science,
        19_500,
        4,
        "9788983710070",
        (2025, 1, 22),
        "빅뱅부터 암흑에너지까지 우주론의 핵심 질문을 풀어낸 교양 과학서.",
    ),
    (
        8,
        "숲속 친구들의 겨울",
        "오지아",
        "비룡소",
        Category::Children,
        11_000,
        40,
        "9788949100083",
        (2024, 10, 5),
        "눈 내린 숲에서 서로를 돕는 동물 친구들의 그림책.",
    ),
    (
        9,
        "바람이 머무는 섬",
        "이서윤",
        "푸른숲",
        Category::Fiction,
        14_500,
        2,
        "9788901000097",
        (2025, 3, 1),
        "사라진 등대지기를 찾아 섬으로 돌아온 한 여자의 이야기.",
    ),
    (
        10,
        "데이터 중심 설계",
        "강현우",
        "위키북스",
        Category::Computing,
        36_000,
        15,
        "9791158390104",
        (2023, 12, 12),
        "신뢰할 수 있고 확장 가능한 데이터 시스템의 원리.",
    ),
    (
        11,
        "마음을 쓰는 시간",
        "서예린",
        "창비",
        Category::Essay,
        12_800,
        8,
        "9788936400118",
        (2024, 8, 30),
        "일과 관계 사이에서 마음을 돌보는 법에 관한 에세이.",
    ),
    (
        12,
        "팀을 이끄는 질문",
        "문재현",
        "21세기북스",
        Category::Business,
        17_500,
        21,
        "9788950900129",
        (2025, 2, 14),
        "좋은 리더는 답 대신 질문을 던진다.",
    ),
];

/// Builds the seed catalog in id order.
pub fn seed_books() -> Vec<Book> {
    SEED_ROWS
        .iter()
        .filter_map(
            |&(id, title, author, publisher, category, price, stock, isbn, (y, m, d), description)| {
                Some(Book {
                    id,
                    title: title.to_string(),
                    author: author.to_string(),
                    publisher: publisher.to_string(),
                    category,
                    price: Money::from_won(price),
                    stock,
                    isbn: isbn.to_string(),
                    publish_date: NaiveDate::from_ymd_opt(y, m, d)?,
                    description: description.to_string(),
                    image: format!("https://covers.folio.example/{isbn}.jpg"),
                })
            },
        )
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_seed_rows_are_all_valid() {
        assert_eq!(seed_books().len(), SEED_ROWS.len());
    }

    #[test]
    fn test_seed_ids_are_unique() {
        let books = seed_books();
        let ids: HashSet<BookId> = books.iter().map(|b| b.id).collect();
        assert_eq!(ids.len(), books.len());
    }

    #[test]
    fn test_seed_covers_every_category() {
        let books = seed_books();
        for category in Category::ALL {
            assert!(
                books.iter().any(|b| b.category == category),
                "no seed book in {category}"
            );
        }
    }
}
