//! SQLite repository for optimizers
//!
//! Maps an `Optimizer` onto the `optimizer` table and its search container
//! relation onto `optimizer_search_container`.

#![allow(clippy::result_large_err)]

use crate::errors::{from_rusqlite, Result};
use crate::repo::serialization::{deserialize_config, serialize_config};
use optimizer_core::errors::{ExError, OptimizerError};
use optimizer_core::model::{FieldValue, Optimizer, SEARCH_CONTAINER_DELIMITER};
use optimizer_core::{log_op_end, log_op_error, log_op_start};
use rusqlite::types::ValueRef;
use rusqlite::{Connection, OptionalExtension, Row, Transaction};
use std::time::Instant;

const OP_LOAD: &str = "optimizer_load";
const OP_SAVE: &str = "optimizer_save";
const OP_DELETE: &str = "optimizer_delete";
const OP_CONTAINERS: &str = "optimizer_search_containers";

/// SQLite repository for optimizers
pub struct SqliteRepo;

/// Primary row as read from storage, before coercion
struct StoredOptimizer {
    name: FieldValue,
    is_active: FieldValue,
    model: FieldValue,
    config: Option<Vec<u8>>,
    store_id: FieldValue,
    from_date: FieldValue,
    to_date: FieldValue,
}

fn column(row: &Row<'_>, idx: usize) -> rusqlite::Result<FieldValue> {
    Ok(match row.get_ref(idx)? {
        ValueRef::Null => FieldValue::Null,
        ValueRef::Integer(i) => FieldValue::Int(i),
        ValueRef::Real(f) => FieldValue::Float(f),
        ValueRef::Text(t) | ValueRef::Blob(t) => {
            FieldValue::Str(String::from_utf8_lossy(t).into_owned())
        }
    })
}

/// Config column as raw bytes, so decoding stays with the deserializer
fn config_bytes(row: &Row<'_>, idx: usize) -> rusqlite::Result<Option<Vec<u8>>> {
    Ok(match row.get_ref(idx)? {
        ValueRef::Null => None,
        ValueRef::Integer(i) => Some(i.to_string().into_bytes()),
        ValueRef::Real(f) => Some(f.to_string().into_bytes()),
        ValueRef::Text(bytes) | ValueRef::Blob(bytes) => Some(bytes.to_vec()),
    })
}

fn non_empty(value: &str) -> Option<&str> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

fn db_error(op: &'static str, optimizer_id: Option<i64>) -> impl Fn(rusqlite::Error) -> ExError {
    move |err| {
        let ex = from_rusqlite(err).with_op(op);
        match optimizer_id {
            Some(id) => ex.with_entity_id(id),
            None => ex,
        }
    }
}

impl SqliteRepo {
    /// Load an optimizer with its config and search containers
    ///
    /// # Errors
    ///
    /// `NotFound` when no row has this id, `CorruptData` when the stored
    /// config is not valid JSON.
    pub fn load(conn: &Connection, optimizer_id: i64) -> Result<Optimizer> {
        log_op_start!(OP_LOAD, optimizer_id);
        let started = Instant::now();

        let optimizer = Self::load_impl(conn, optimizer_id).map_err(|e| {
            log_op_error!(OP_LOAD, optimizer_id, started, &e);
            e
        })?;

        log_op_end!(OP_LOAD, optimizer_id, started);
        Ok(optimizer)
    }

    fn load_impl(conn: &Connection, optimizer_id: i64) -> Result<Optimizer> {
        let stored = conn
            .query_row(
                "SELECT name, is_active, model, config, store_id, from_date, to_date
                 FROM optimizer WHERE optimizer_id = ?1",
                [optimizer_id],
                |row| {
                    Ok(StoredOptimizer {
                        name: column(row, 0)?,
                        is_active: column(row, 1)?,
                        model: column(row, 2)?,
                        config: config_bytes(row, 3)?,
                        store_id: column(row, 4)?,
                        from_date: column(row, 5)?,
                        to_date: column(row, 6)?,
                    })
                },
            )
            .optional()
            .map_err(db_error(OP_LOAD, Some(optimizer_id)))?
            .ok_or_else(|| ExError::from(OptimizerError::NotFound { optimizer_id }).with_op(OP_LOAD))?;

        let config = deserialize_config(optimizer_id, stored.config.as_deref())
            .map_err(|e| ExError::from(e).with_op(OP_LOAD))?;

        let containers = Self::search_containers_for(conn, optimizer_id)?;

        let mut optimizer = Optimizer::new();
        optimizer.assign_id(optimizer_id);
        optimizer
            .set_name(stored.name)
            .set_is_active(stored.is_active)
            .set_model(stored.model)
            .set_config(config)
            .set_store_id(stored.store_id)
            .set_from_date(stored.from_date)
            .set_to_date(stored.to_date)
            .set_search_container(containers.join(SEARCH_CONTAINER_DELIMITER));

        Ok(optimizer)
    }

    /// Persist an optimizer and, if it carries a non-empty container list,
    /// replace its search container relations. Returns the optimizer id.
    ///
    /// Everything runs in one transaction. The store-assigned id is written
    /// back only after commit, so a failed save leaves the optimizer as it was.
    ///
    /// # Errors
    ///
    /// `NotFound` when the optimizer carries an id that has no row.
    /// `ConstraintViolation` for rejected rows, `Connection` for transport
    /// failures, `Persistence` for anything else the store reports.
    pub fn save(conn: &mut Connection, optimizer: &mut Optimizer) -> Result<i64> {
        log_op_start!(OP_SAVE, optimizer.id(), store_id = optimizer.store_id());
        let started = Instant::now();

        let optimizer_id = Self::save_impl(conn, optimizer).map_err(|e| {
            log_op_error!(OP_SAVE, optimizer.id(), started, &e);
            e
        })?;

        let container_count = optimizer.search_containers().map_or(0, <[String]>::len);
        log_op_end!(
            OP_SAVE,
            optimizer_id,
            started,
            container_count = container_count as u64
        );
        Ok(optimizer_id)
    }

    fn save_impl(conn: &mut Connection, optimizer: &mut Optimizer) -> Result<i64> {
        let tx = conn
            .transaction()
            .map_err(db_error(OP_SAVE, optimizer.id()))?;
        let optimizer_id = Self::save_tx(&tx, optimizer)?;
        tx.commit().map_err(db_error(OP_SAVE, Some(optimizer_id)))?;

        optimizer.assign_id(optimizer_id);
        let joined = optimizer
            .search_containers()
            .filter(|containers| !containers.is_empty())
            .map(|containers| containers.join(SEARCH_CONTAINER_DELIMITER));
        if let Some(joined) = joined {
            optimizer.set_search_container(joined);
        }

        Ok(optimizer_id)
    }

    /// Write an optimizer within a caller-owned transaction
    ///
    /// Does not touch the optimizer; the caller assigns the returned id once
    /// the transaction commits.
    pub fn save_tx(tx: &Transaction, optimizer: &Optimizer) -> Result<i64> {
        let config = serialize_config(optimizer.config())
            .map_err(|e| ExError::from(e).with_op(OP_SAVE))?;

        let optimizer_id = match optimizer.id() {
            None => {
                tx.execute(
                    "INSERT INTO optimizer (name, is_active, model, config, store_id, from_date, to_date)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                    rusqlite::params![
                        optimizer.name(),
                        optimizer.is_active(),
                        optimizer.model(),
                        config,
                        optimizer.store_id(),
                        non_empty(optimizer.from_date()),
                        non_empty(optimizer.to_date()),
                    ],
                )
                .map_err(db_error(OP_SAVE, None))?;
                tx.last_insert_rowid()
            }
            Some(optimizer_id) => {
                let updated = tx
                    .execute(
                        "UPDATE optimizer SET
                            name = ?2, is_active = ?3, model = ?4, config = ?5,
                            store_id = ?6, from_date = ?7, to_date = ?8
                         WHERE optimizer_id = ?1",
                        rusqlite::params![
                            optimizer_id,
                            optimizer.name(),
                            optimizer.is_active(),
                            optimizer.model(),
                            config,
                            optimizer.store_id(),
                            non_empty(optimizer.from_date()),
                            non_empty(optimizer.to_date()),
                        ],
                    )
                    .map_err(db_error(OP_SAVE, Some(optimizer_id)))?;
                // Ids come from the store; one with no row was never assigned here
                if updated == 0 {
                    return Err(ExError::from(OptimizerError::NotFound { optimizer_id })
                        .with_op(OP_SAVE));
                }
                optimizer_id
            }
        };

        if let Some(containers) = optimizer.search_containers() {
            if !containers.is_empty() {
                Self::replace_search_containers(tx, optimizer_id, containers)?;
            }
        }

        Ok(optimizer_id)
    }

    /// Delete-then-insert the relation rows for one optimizer
    fn replace_search_containers(
        tx: &Transaction,
        optimizer_id: i64,
        containers: &[String],
    ) -> Result<()> {
        let to_err = db_error(OP_SAVE, Some(optimizer_id));

        tx.execute(
            "DELETE FROM optimizer_search_container WHERE optimizer_id = ?1",
            [optimizer_id],
        )
        .map_err(&to_err)?;

        let mut stmt = tx
            .prepare(
                "INSERT INTO optimizer_search_container (optimizer_id, search_container)
                 VALUES (?1, ?2)
                 ON CONFLICT(optimizer_id, search_container) DO NOTHING",
            )
            .map_err(&to_err)?;

        for container in containers {
            stmt.execute(rusqlite::params![optimizer_id, container])
                .map_err(&to_err)?;
        }

        Ok(())
    }

    /// Search container names linked to an optimizer, in insertion order
    pub fn search_containers_for(conn: &Connection, optimizer_id: i64) -> Result<Vec<String>> {
        let to_err = db_error(OP_CONTAINERS, Some(optimizer_id));

        let mut stmt = conn
            .prepare(
                "SELECT search_container FROM optimizer_search_container
                 WHERE optimizer_id = ?1 ORDER BY rowid",
            )
            .map_err(&to_err)?;

        let containers = stmt
            .query_map([optimizer_id], |row| row.get(0))
            .map_err(&to_err)?
            .collect::<std::result::Result<Vec<String>, _>>()
            .map_err(&to_err)?;

        Ok(containers)
    }

    /// Remove every search container relation of an optimizer.
    ///
    /// Saving never clears relations on its own; this is the explicit path.
    /// Returns the number of rows removed.
    pub fn clear_search_containers(conn: &Connection, optimizer_id: i64) -> Result<usize> {
        conn.execute(
            "DELETE FROM optimizer_search_container WHERE optimizer_id = ?1",
            [optimizer_id],
        )
        .map_err(db_error(OP_CONTAINERS, Some(optimizer_id)))
    }

    /// Delete an optimizer and its relations
    ///
    /// # Errors
    ///
    /// `NotFound` when no row has this id.
    pub fn delete(conn: &mut Connection, optimizer_id: i64) -> Result<()> {
        log_op_start!(OP_DELETE, optimizer_id);
        let started = Instant::now();

        Self::delete_impl(conn, optimizer_id).map_err(|e| {
            log_op_error!(OP_DELETE, optimizer_id, started, &e);
            e
        })?;

        log_op_end!(OP_DELETE, optimizer_id, started);
        Ok(())
    }

    fn delete_impl(conn: &mut Connection, optimizer_id: i64) -> Result<()> {
        let to_err = db_error(OP_DELETE, Some(optimizer_id));
        let tx = conn.transaction().map_err(&to_err)?;

        tx.execute(
            "DELETE FROM optimizer_search_container WHERE optimizer_id = ?1",
            [optimizer_id],
        )
        .map_err(&to_err)?;

        let removed = tx
            .execute(
                "DELETE FROM optimizer WHERE optimizer_id = ?1",
                [optimizer_id],
            )
            .map_err(&to_err)?;

        if removed == 0 {
            return Err(
                ExError::from(OptimizerError::NotFound { optimizer_id }).with_op(OP_DELETE)
            );
        }

        tx.commit().map_err(&to_err)
    }

    /// Check whether a primary row exists for the id
    pub fn exists(conn: &Connection, optimizer_id: i64) -> Result<bool> {
        conn.query_row(
            "SELECT 1 FROM optimizer WHERE optimizer_id = ?1",
            [optimizer_id],
            |_| Ok(()),
        )
        .optional()
        .map(|found| found.is_some())
        .map_err(db_error(OP_LOAD, Some(optimizer_id)))
    }

    /// Ids of the optimizers scoped to a store, ascending
    pub fn ids_for_store(conn: &Connection, store_id: i64) -> Result<Vec<i64>> {
        let to_err = db_error(OP_LOAD, None);

        let mut stmt = conn
            .prepare("SELECT optimizer_id FROM optimizer WHERE store_id = ?1 ORDER BY optimizer_id")
            .map_err(&to_err)?;

        let ids = stmt
            .query_map([store_id], |row| row.get(0))
            .map_err(&to_err)?
            .collect::<std::result::Result<Vec<i64>, _>>()
            .map_err(&to_err)?;

        Ok(ids)
    }
}
