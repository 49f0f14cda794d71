//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `wordbank_core` wiring.
//! - Keep output deterministic for quick local sanity checks.

use std::error::Error;
use wordbank_core::db::open_db_in_memory;
use wordbank_core::{
    load_word_page, CountRepository, SqliteCountRepository, SqliteWordRepository, WordPageQuery,
    WordService,
};

fn main() -> Result<(), Box<dyn Error>> {
    println!("wordbank_core version={}", wordbank_core::core_version());

    let mut conn = open_db_in_memory()?;
    {
        let repo = SqliteWordRepository::try_new(&mut conn)?;
        let mut service = WordService::new(repo);

        for (word, meaning) in [
            ("Apple", "a common fruit"),
            ("Banana", "a long yellow fruit"),
            ("Avocado", "a green fruit with a large pit"),
        ] {
            let submitted = service.submit_word("smoke-user", word, meaning, Vec::new())?;
            println!(
                "submitted word={} total_count={}",
                submitted.word.word, submitted.total_count
            );
        }
    }

    let page = load_word_page(&conn, &WordPageQuery::new(2))?;
    for word in &page {
        println!("page_entry word={}", word.word);
    }

    let counter = SqliteCountRepository::try_new(&conn)?;
    println!("total_word_count={}", counter.total_word_count()?);

    Ok(())
}
