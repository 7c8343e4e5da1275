use anyhow::Result;
use cwlog_store::Session;
use serde::Serialize;
use std::io::{self, Write};

pub mod completions;
pub mod filters;

pub struct Context<'a> {
    pub session: &'a mut Session,
    pub json: bool,
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}
