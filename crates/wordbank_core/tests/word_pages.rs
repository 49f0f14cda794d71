use rusqlite::Connection;
use wordbank_core::db::open_db_in_memory;
use wordbank_core::{
    load_owner_word_page, load_word_page, SqliteWordRepository, Word, WordId, WordPageQuery,
    WordRepository,
};

#[test]
fn first_page_is_newest_first_and_cursor_continues() {
    let mut conn = open_db_in_memory().unwrap();
    insert_words(&mut conn, &[("user-1", "Apple"), ("user-1", "Banana"), ("user-1", "Avocado")]);

    let first_page = load_word_page(&conn, &WordPageQuery::new(2)).unwrap();
    assert_eq!(page_names(&first_page), ["Avocado", "Banana"]);

    let next_query = WordPageQuery {
        limit: 2,
        starts_after: Some(first_page[1].uuid),
        ..WordPageQuery::default()
    };
    let second_page = load_word_page(&conn, &next_query).unwrap();
    assert_eq!(page_names(&second_page), ["Apple"]);
}

#[test]
fn pages_never_exceed_limit() {
    let mut conn = open_db_in_memory().unwrap();
    let names: Vec<String> = (0..9).map(|index| format!("word-{index}")).collect();
    let pairs: Vec<(&str, &str)> = names.iter().map(|name| ("user-1", name.as_str())).collect();
    insert_words(&mut conn, &pairs);

    let page = load_word_page(&conn, &WordPageQuery::new(4)).unwrap();
    assert_eq!(page.len(), 4);

    let oversized = load_word_page(&conn, &WordPageQuery::new(50)).unwrap();
    assert_eq!(oversized.len(), 9);
}

#[test]
fn chained_pages_reconstruct_the_full_set_without_dups_or_gaps() {
    let mut conn = open_db_in_memory().unwrap();
    let names: Vec<String> = (0..10).map(|index| format!("entry-{index}")).collect();
    let pairs: Vec<(&str, &str)> = names.iter().map(|name| ("user-1", name.as_str())).collect();
    insert_words(&mut conn, &pairs);

    let mut collected: Vec<Word> = Vec::new();
    let mut cursor: Option<WordId> = None;
    loop {
        let query = WordPageQuery {
            limit: 3,
            starts_after: cursor,
            ..WordPageQuery::default()
        };
        let page = load_word_page(&conn, &query).unwrap();
        if page.is_empty() {
            break;
        }
        cursor = Some(page[page.len() - 1].uuid);
        collected.extend(page);
    }

    let expected: Vec<String> = names.iter().rev().cloned().collect();
    let collected_names: Vec<String> =
        collected.iter().map(|word| word.word.clone()).collect();
    assert_eq!(collected_names, expected);
}

#[test]
fn unknown_cursor_yields_empty_page() {
    let mut conn = open_db_in_memory().unwrap();
    insert_words(&mut conn, &[("user-1", "Apple"), ("user-1", "Banana")]);

    let query = WordPageQuery {
        limit: 5,
        starts_after: Some(uuid::Uuid::new_v4()),
        ..WordPageQuery::default()
    };
    assert!(load_word_page(&conn, &query).unwrap().is_empty());
}

#[test]
fn deleted_cursor_yields_empty_page() {
    let mut conn = open_db_in_memory().unwrap();
    let banana_id = {
        let repo = SqliteWordRepository::try_new(&mut conn).unwrap();
        repo.create_word(&Word::new("user-1", "Apple", "", vec![]))
            .unwrap();
        let banana = Word::new("user-1", "Banana", "", vec![]);
        repo.create_word(&banana).unwrap();
        repo.delete_word("Banana").unwrap();
        banana.uuid
    };

    let query = WordPageQuery {
        limit: 5,
        starts_after: Some(banana_id),
        ..WordPageQuery::default()
    };
    assert!(load_word_page(&conn, &query).unwrap().is_empty());
}

#[test]
fn search_filters_before_pagination() {
    let mut conn = open_db_in_memory().unwrap();
    insert_words(
        &mut conn,
        &[
            ("user-1", "Lighthouse"),
            ("user-1", "Delight"),
            ("user-1", "Apple"),
            ("user-1", "Light"),
        ],
    );

    let query = WordPageQuery {
        limit: 2,
        search: Some("light".to_string()),
        ..WordPageQuery::default()
    };
    let page = load_word_page(&conn, &query).unwrap();
    // Limit bounds the filtered sequence, newest first.
    assert_eq!(page_names(&page), ["Light", "Delight"]);

    let next_query = WordPageQuery {
        limit: 2,
        starts_after: Some(page[1].uuid),
        search: Some("LIGHT".to_string()),
        ..WordPageQuery::default()
    };
    let next = load_word_page(&conn, &next_query).unwrap();
    assert_eq!(page_names(&next), ["Lighthouse"]);
}

#[test]
fn first_letter_filter_accepts_either_case() {
    let mut conn = open_db_in_memory().unwrap();
    insert_words(
        &mut conn,
        &[
            ("user-1", "apple"),
            ("user-1", "Avocado"),
            ("user-1", "Banana"),
        ],
    );

    for letter in ['a', 'A'] {
        let query = WordPageQuery {
            limit: 10,
            first_letter: Some(letter),
            ..WordPageQuery::default()
        };
        let page = load_word_page(&conn, &query).unwrap();
        assert_eq!(page_names(&page), ["Avocado", "apple"], "letter={letter}");
    }
}

#[test]
fn owner_scoped_pages_only_see_that_owner() {
    let mut conn = open_db_in_memory().unwrap();
    insert_words(
        &mut conn,
        &[
            ("user-1", "Alpha"),
            ("user-2", "Beta"),
            ("user-1", "Gamma"),
            ("user-2", "Delta"),
        ],
    );

    let page = load_owner_word_page(&conn, "user-2", &WordPageQuery::new(10)).unwrap();
    assert_eq!(page_names(&page), ["Delta", "Beta"]);

    let next_query = WordPageQuery {
        limit: 10,
        starts_after: Some(page[0].uuid),
        ..WordPageQuery::default()
    };
    let next = load_owner_word_page(&conn, "user-2", &next_query).unwrap();
    assert_eq!(page_names(&next), ["Beta"]);

    // The same cursor resolves to nothing inside another owner's sequence.
    assert!(load_owner_word_page(&conn, "user-1", &next_query)
        .unwrap()
        .is_empty());
}

#[test]
fn newest_first_order_follows_insertion_timestamps() {
    let mut conn = open_db_in_memory().unwrap();
    let (early_id, late_id) = {
        let repo = SqliteWordRepository::try_new(&mut conn).unwrap();
        let early = Word::new("user-1", "EarlyEntry", "", vec![]);
        let late = Word::new("user-1", "LateEntry", "", vec![]);
        // Insert the late record first so timestamp order disagrees with
        // physical insert order.
        repo.create_word(&late).unwrap();
        repo.create_word(&early).unwrap();
        (early.uuid, late.uuid)
    };

    conn.execute(
        "UPDATE words SET created_at = 1000 WHERE uuid = ?1;",
        [early_id.to_string()],
    )
    .unwrap();
    conn.execute(
        "UPDATE words SET created_at = 2000 WHERE uuid = ?1;",
        [late_id.to_string()],
    )
    .unwrap();

    let page = load_word_page(&conn, &WordPageQuery::new(10)).unwrap();
    assert_eq!(page_names(&page), ["LateEntry", "EarlyEntry"]);
}

#[test]
fn zero_limit_returns_empty_page() {
    let mut conn = open_db_in_memory().unwrap();
    insert_words(&mut conn, &[("user-1", "Apple")]);

    assert!(load_word_page(&conn, &WordPageQuery::new(0))
        .unwrap()
        .is_empty());
}

fn insert_words(conn: &mut Connection, entries: &[(&str, &str)]) {
    let repo = SqliteWordRepository::try_new(conn).unwrap();
    for (owner, name) in entries {
        repo.create_word(&Word::new(*owner, *name, "", vec![]))
            .unwrap();
    }
}

fn page_names(page: &[Word]) -> Vec<&str> {
    page.iter().map(|word| word.word.as_str()).collect()
}
