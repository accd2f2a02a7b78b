//! Унифицированные трэйты чтения/записи истории операций на основе std::io::{BufRead, Write}.

use crate::{error::Result, model::Transaction};
use std::io::{BufRead, Write};

pub trait ReadFormat {
    fn read<R: BufRead>(r: R) -> Result<Vec<Transaction>>;
}

pub trait WriteFormat {
    fn write<W: Write>(w: W, history: &[Transaction]) -> Result<()>;
}

pub trait Format: ReadFormat + WriteFormat {}
impl<T: ReadFormat + WriteFormat> Format for T {}
