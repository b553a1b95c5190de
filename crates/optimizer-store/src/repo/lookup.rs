//! Repository-by-id lookup for the form layer

#![allow(clippy::result_large_err)]

use crate::repo::SqliteRepo;
use optimizer_core::errors::Result;
use optimizer_core::form::OptimizerLookup;
use optimizer_core::model::Optimizer;
use rusqlite::Connection;

/// `OptimizerLookup` that loads straight from SQLite
pub struct SqliteOptimizerLookup<'a> {
    conn: &'a Connection,
}

impl<'a> SqliteOptimizerLookup<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }
}

impl OptimizerLookup for SqliteOptimizerLookup<'_> {
    fn get_by_id(&self, id: i64) -> Result<Optimizer> {
        SqliteRepo::load(self.conn, id)
    }
}
