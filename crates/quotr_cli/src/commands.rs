//! Command dispatch against the core services.

use crate::config::{BookCommand, BookFields, Command, QuoteCommand, QuoteFields};
use crate::render;
use anyhow::Context;
use quotr_core::{
    AccountService, BookDraft, BookService, Fts5SearchProvider, PageRequest, Principal,
    QuoteDraft, QuoteService, SqliteBookRepository, SqliteQuoteRepository, SqliteUserRepository,
};
use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Catalog command issued without a resolvable `--user`.
#[derive(Debug)]
pub struct SignInRequired;

impl Display for SignInRequired {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "sign in required: pass --user <name> of a registered user")
    }
}

impl Error for SignInRequired {}

/// Runs one command and returns the text to print.
pub fn run(
    conn: &Connection,
    user: Option<&str>,
    json: bool,
    command: Command,
) -> anyhow::Result<String> {
    let accounts = AccountService::new(SqliteUserRepository::try_new(conn)?);

    match command {
        Command::Register { username } => {
            let user = accounts.register_user(&username)?;
            if json {
                return render::json(&user);
            }
            Ok(format!("Registered {} (#{}).", user.username, user.id))
        }
        Command::Books(command) => {
            let principal = authenticate(&accounts, user)?;
            let repo = SqliteBookRepository::try_new(conn, &principal)?;
            run_books(BookService::new(repo), json, command)
        }
        Command::Quotes(command) => {
            let principal = authenticate(&accounts, user)?;
            let repo = SqliteQuoteRepository::try_new(conn, &principal)?;
            let search = Fts5SearchProvider::try_new(conn)?;
            run_quotes(QuoteService::new(repo, search), json, command)
        }
    }
}

fn authenticate(
    accounts: &AccountService<SqliteUserRepository<'_>>,
    user: Option<&str>,
) -> anyhow::Result<Principal> {
    let username = user.ok_or(SignInRequired)?;
    let principal = accounts
        .resolve_principal(username)
        .context("failed to resolve user")?
        .ok_or(SignInRequired)?;
    Ok(principal)
}

fn run_books(
    service: BookService<SqliteBookRepository<'_>>,
    json: bool,
    command: BookCommand,
) -> anyhow::Result<String> {
    match command {
        BookCommand::List { page } => {
            let page = service.list_books(PageRequest::new(page))?;
            if json {
                return render::json(&page);
            }
            Ok(render::book_page(&page))
        }
        BookCommand::Show { id } => {
            let detail = service.get_book_detail(id)?;
            if json {
                return render::json(&detail);
            }
            Ok(render::book_detail(&detail))
        }
        BookCommand::Add(fields) => {
            let book = service.create_book(&book_draft(fields))?;
            if json {
                return render::json(&book);
            }
            Ok(format!("Created {}", render::book(&book)))
        }
        BookCommand::Edit { id, fields } => {
            let book = service.update_book(id, &book_draft(fields))?;
            if json {
                return render::json(&book);
            }
            Ok(format!("Updated {}", render::book(&book)))
        }
        BookCommand::Delete { id } => {
            service.delete_book(id)?;
            Ok(format!("Deleted book #{id} and its quotes."))
        }
    }
}

fn run_quotes(
    service: QuoteService<SqliteQuoteRepository<'_>, Fts5SearchProvider<'_>>,
    json: bool,
    command: QuoteCommand,
) -> anyhow::Result<String> {
    match command {
        QuoteCommand::List { search, page } => {
            let search = search.as_deref();
            let listed = service.list_quotes(search, PageRequest::new(page))?;
            if json {
                return render::json(&listed);
            }
            let searched = search.is_some_and(|term| !term.trim().is_empty());
            Ok(render::quote_page(&listed, searched))
        }
        QuoteCommand::Show { id } => {
            let quote = service.get_quote(id)?;
            if json {
                return render::json(&quote);
            }
            Ok(render::quote(&quote))
        }
        QuoteCommand::Add(fields) => {
            let quote = service.create_quote(&quote_draft(fields))?;
            if json {
                return render::json(&quote);
            }
            Ok(format!("Created quote #{}.", quote.id))
        }
        QuoteCommand::Edit { id, fields } => {
            let quote = service.update_quote(id, &quote_draft(fields))?;
            if json {
                return render::json(&quote);
            }
            Ok(format!("Updated quote #{}.", quote.id))
        }
        QuoteCommand::Delete { id } => {
            service.delete_quote(id)?;
            Ok(format!("Deleted quote #{id}."))
        }
    }
}

fn book_draft(fields: BookFields) -> BookDraft {
    BookDraft::new(fields.title, fields.author)
}

fn quote_draft(fields: QuoteFields) -> QuoteDraft {
    QuoteDraft::new(fields.book, fields.text, fields.page_number)
}
