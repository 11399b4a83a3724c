use sea_orm::{
    ColumnTrait, DatabaseConnection,
    sea_query::{Expr, LikeExpr, SimpleExpr},
};

use crate::{EngineError, ResultEngine, util::like_pattern};

mod auth;
mod campaigns;
mod donations;
mod donors;
mod reports;

/// Run a block inside a DB transaction, committing on success and rolling back on error.
macro_rules! with_tx {
    ($self:expr, |$tx:ident| $body:expr) => {{
        let $tx = $self.database.begin().await?;
        let result = $body;
        match result {
            Ok(value) => {
                $tx.commit().await?;
                Ok(value)
            }
            Err(err) => Err(err),
        }
    }};
}

pub(crate) use with_tx;

/// Entry point for every donor, campaign, donation, report and login
/// operation.
///
/// The engine keeps no in-memory cache: each call reads from and writes to
/// the database.
#[derive(Debug)]
pub struct Engine {
    database: DatabaseConnection,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }
}

fn not_found(label: &str, id: i32) -> EngineError {
    EngineError::NotFound(format!("{label} {id}"))
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.trim().is_empty())
}

/// Case-insensitive substring match on a column holding folded text
/// (a `*_key` column or the lowercased email).
fn contains_folded<C: ColumnTrait>(column: C, needle: &str) -> SimpleExpr {
    let pattern = LikeExpr::new(like_pattern(needle)).escape('\\');
    Expr::col(column).like(pattern)
}

/// The builder for `Engine`
#[derive(Default)]
pub struct EngineBuilder {
    database: DatabaseConnection,
}

impl EngineBuilder {
    /// Pass the required database
    pub fn database(mut self, db: DatabaseConnection) -> EngineBuilder {
        self.database = db;
        self
    }

    /// Construct `Engine`
    pub async fn build(self) -> ResultEngine<Engine> {
        Ok(Engine {
            database: self.database,
        })
    }
}
