// src/cli/migrate.rs — Database migration command
//
// Migrations run automatically whenever the store opens; this command
// reports the applied versions or undoes the latest one.

use std::path::Path;

use rusqlite::Connection;

use crate::store::schema;

pub fn run_migrate(db_path: &Path, status_only: bool, rollback: bool) -> anyhow::Result<()> {
    if !db_path.exists() && (status_only || rollback) {
        println!("No database found at: {}", db_path.display());
        println!("Run `hackeval submit` or `hackeval migrate` to create it.");
        return Ok(());
    }

    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let conn = Connection::open(db_path)?;

    if status_only {
        return show_migration_status(&conn, db_path);
    }

    if rollback {
        match schema::rollback_last(&conn)? {
            Some(version) => {
                println!("Rolled back migration v{version}.");
                println!("Run `hackeval migrate --status` to verify.");
            }
            None => println!("No migrations to roll back."),
        }
        return Ok(());
    }

    println!("Running database migrations...");
    schema::run_migrations(&conn)?;
    println!("Migrations complete.");
    show_migration_status(&conn, db_path)
}

fn show_migration_status(conn: &Connection, db_path: &Path) -> anyhow::Result<()> {
    let current = schema::current_version(conn)?;
    println!("Database: {}", db_path.display());
    println!("Current schema version: {current}");

    if current == 0 {
        println!("No migrations have been run yet.");
        return Ok(());
    }

    let mut stmt =
        conn.prepare("SELECT version, name, applied_at FROM _migrations ORDER BY version")?;
    let rows = stmt.query_map([], |row| {
        Ok((
            row.get::<_, u32>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, String>(2)?,
        ))
    })?;

    println!();
    println!("Applied migrations:");
    for row in rows {
        let (version, name, applied_at) = row?;
        println!("  v{version}: {name} (applied {applied_at})");
    }
    Ok(())
}
