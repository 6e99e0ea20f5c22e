//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `bookstore_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

use bookstore_core::db::open_db_in_memory;
use bookstore_core::{
    Book, BookService, Editorial, EditorialService, SqliteBookRepository,
    SqliteEditorialRepository,
};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    println!("bookstore_core version={}", bookstore_core::core_version());

    let conn = open_db_in_memory()?;

    let editorials = EditorialService::new(SqliteEditorialRepository::try_new(&conn)?);
    let editorial = editorials.create_editorial(&Editorial::new("Smoke Press"))?;

    let books = BookService::new(SqliteBookRepository::try_new(&conn)?);
    let book = books.create_book(&Book::new("Smoke Test", "978-0000000000", editorial.id))?;

    println!(
        "seeded editorial id={} book id={} books_total={}",
        editorial.id,
        book.id,
        books.list_books()?.len()
    );

    Ok(())
}
