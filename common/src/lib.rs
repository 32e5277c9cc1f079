//! Ad Header Common Library
//!
//! 广告模版シートから bulk header テーブルを作る変換コア（ファイルI/Oなし）

pub mod types;
pub mod grid;
pub mod diagnostics;
pub mod error;
pub mod options;
pub mod region;
pub mod settings;
pub mod taxonomy;
pub mod activity;
pub mod validator;
pub mod classifier;
pub mod keywords;
pub mod negatives;
pub mod schema;
pub mod emitter;
pub mod pipeline;
pub mod export;

pub use types::{Activity, Classification, GlobalSettings, MatchType, Theme, ThemeKind};
pub use grid::Grid;
pub use diagnostics::{Checked, Diagnostic, DiagnosticKind, Severity};
pub use error::{ConversionError, ConversionFailure, Error, Result};
pub use options::ConversionOptions;
pub use schema::{HeaderTables, OutputCell, OutputRow};
pub use pipeline::{convert, inspect, Conversion, Inspection};
