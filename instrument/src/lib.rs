//! Event recording for settlement turn simulations.
//!
//! A `tracing` subscriber that turns every `info!` event into a row of a
//! column table. Tables are keyed by the event target (`growth`,
//! `starvation`, `assignment`, ...) and columns are created the first time a
//! field name is seen, so the schema follows whatever the simulation emits.
//!
//! ```ignore
//! // simulation side
//! tracing::info!(target: "growth", settlement_id, population, food_stored);
//!
//! // test side
//! let mut rec = instrument::TurnRecorder::start();
//! // ... run turns ...
//! let growth = &rec.frames()["growth"];
//! ```

use std::cell::RefCell;
use std::collections::HashMap;

use polars::prelude::*;
use tracing::field::{Field, Visit};
use tracing::span::{Attributes, Record};
use tracing::{Event, Id, Metadata, Subscriber};

/// Values recorded for one field, one entry per row.
#[derive(Debug, Clone)]
pub enum FieldColumn {
    U64(Vec<u64>),
    I64(Vec<i64>),
    F64(Vec<f64>),
    Bool(Vec<bool>),
    Str(Vec<String>),
}

impl FieldColumn {
    pub fn len(&self) -> usize {
        match self {
            FieldColumn::U64(v) => v.len(),
            FieldColumn::I64(v) => v.len(),
            FieldColumn::F64(v) => v.len(),
            FieldColumn::Bool(v) => v.len(),
            FieldColumn::Str(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Fill with defaults until the column holds `rows` entries.
    fn fill_to(&mut self, rows: usize) {
        let missing = rows.saturating_sub(self.len());
        if missing == 0 {
            return;
        }
        match self {
            FieldColumn::U64(v) => v.resize(rows, 0),
            FieldColumn::I64(v) => v.resize(rows, 0),
            FieldColumn::F64(v) => v.resize(rows, 0.0),
            FieldColumn::Bool(v) => v.resize(rows, false),
            FieldColumn::Str(v) => v.resize(rows, String::new()),
        }
    }
}

/// All rows recorded for one event target.
#[derive(Debug, Clone, Default)]
pub struct EventTable {
    pub columns: HashMap<String, FieldColumn>,
    pub rows: usize,
}

impl EventTable {
    fn align(&mut self) {
        let rows = self.rows;
        for column in self.columns.values_mut() {
            column.fill_to(rows);
        }
    }

    /// Column handle for `name`, created (back-filled with defaults) when
    /// first seen.
    fn column_for(&mut self, name: &str, make: fn(usize) -> FieldColumn) -> &mut FieldColumn {
        let rows = self.rows;
        self.columns
            .entry(name.to_string())
            .or_insert_with(|| make(rows))
    }

    pub fn to_dataframe(&self) -> PolarsResult<DataFrame> {
        let columns: Vec<Column> = self
            .columns
            .iter()
            .map(|(name, values)| match values {
                FieldColumn::U64(v) => Column::new(name.into(), v),
                FieldColumn::I64(v) => Column::new(name.into(), v),
                FieldColumn::F64(v) => Column::new(name.into(), v),
                FieldColumn::Bool(v) => Column::new(name.into(), v),
                FieldColumn::Str(v) => Column::new(name.into(), v),
            })
            .collect();
        DataFrame::new(columns)
    }
}

/// Tables keyed by tracing target.
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    pub tables: HashMap<String, EventTable>,
}

impl Recorder {
    /// Number of events recorded under `target`.
    pub fn count(&self, target: &str) -> usize {
        self.tables.get(target).map(|t| t.rows).unwrap_or(0)
    }

    pub fn to_dataframes(&self) -> HashMap<String, DataFrame> {
        self.tables
            .iter()
            .filter_map(|(name, table)| table.to_dataframe().ok().map(|df| (name.clone(), df)))
            .collect()
    }
}

thread_local! {
    static RECORDER: RefCell<Recorder> = RefCell::default();
}

struct RowVisitor<'a> {
    table: &'a mut EventTable,
}

impl Visit for RowVisitor<'_> {
    fn record_u64(&mut self, field: &Field, value: u64) {
        if let FieldColumn::U64(v) = self
            .table
            .column_for(field.name(), |n| FieldColumn::U64(vec![0; n]))
        {
            v.push(value);
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        if let FieldColumn::I64(v) = self
            .table
            .column_for(field.name(), |n| FieldColumn::I64(vec![0; n]))
        {
            v.push(value);
        }
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        if let FieldColumn::F64(v) = self
            .table
            .column_for(field.name(), |n| FieldColumn::F64(vec![0.0; n]))
        {
            v.push(value);
        }
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        if let FieldColumn::Bool(v) = self
            .table
            .column_for(field.name(), |n| FieldColumn::Bool(vec![false; n]))
        {
            v.push(value);
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if let FieldColumn::Str(v) = self
            .table
            .column_for(field.name(), |n| FieldColumn::Str(vec![String::new(); n]))
        {
            v.push(value.to_string());
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        self.record_str(field, &format!("{:?}", value));
    }
}

/// Subscriber that appends info-level events to the thread-local recorder.
pub struct TableSubscriber;

impl Subscriber for TableSubscriber {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.is_event() && *metadata.level() <= tracing::Level::INFO
    }

    fn new_span(&self, _span: &Attributes<'_>) -> Id {
        Id::from_u64(1)
    }

    fn record(&self, _span: &Id, _values: &Record<'_>) {}

    fn record_follows_from(&self, _span: &Id, _follows: &Id) {}

    fn event(&self, event: &Event<'_>) {
        let target = event.metadata().target().to_string();
        RECORDER.with(|r| {
            let mut recorder = r.borrow_mut();
            let table = recorder.tables.entry(target).or_default();
            table.align();
            event.record(&mut RowVisitor { table: &mut *table });
            table.rows += 1;
            // fields absent from this event still need a cell in this row
            table.align();
        });
    }

    fn enter(&self, _span: &Id) {}

    fn exit(&self, _span: &Id) {}
}

/// Install [`TableSubscriber`] as the process-wide default. Later calls are
/// ignored.
pub fn install_subscriber() {
    let _ = tracing::subscriber::set_global_default(TableSubscriber);
}

/// Take everything recorded on this thread so far.
pub fn drain() -> Recorder {
    RECORDER.with(|r| std::mem::take(&mut *r.borrow_mut()))
}

pub fn clear() {
    RECORDER.with(|r| *r.borrow_mut() = Recorder::default());
}

/// Guard for one recorded run: installs the subscriber and clears stale rows
/// on creation, drains to DataFrames on first access.
pub struct TurnRecorder {
    frames: Option<HashMap<String, DataFrame>>,
}

impl TurnRecorder {
    pub fn start() -> Self {
        install_subscriber();
        clear();
        Self { frames: None }
    }

    pub fn frames(&mut self) -> &HashMap<String, DataFrame> {
        self.frames.get_or_insert_with(|| drain().to_dataframes())
    }
}
