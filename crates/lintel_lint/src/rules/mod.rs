//! All built-in lint rule implementations.
//!
//! This module re-exports all individual rule types and provides
//! `register_builtin_rules` to add all 11 rules to a `LintEngine`.

mod c201;
mod c202;
mod c203;
mod c204;
mod c205;
mod e101;
mod e102;
mod w101;
mod w102;
mod w103;
mod w104;

pub use c201::OneComponentPerFile;
pub use c202::BooleanNaming;
pub use c203::SvgCurrentColor;
pub use c204::MemoizedExport;
pub use c205::NoJsxInServices;
pub use e101::JsxElementComponentMismatch;
pub use e102::UiNodePropAsComponent;
pub use w101::NoNestedTernary;
pub use w102::NoInlineObjectProps;
pub use w103::NoInlineFunctionProps;
pub use w104::NoEmptyCatch;

use lintel_config::FilePatterns;

use crate::LintEngine;

/// Icon-like files: the default activation of the icon rules.
const ICON_FILES: &[&str] = &["**/icons/**", "**/*Icon.tsx", "**/*Icon.jsx"];

fn icon_files() -> FilePatterns {
    FilePatterns::defaults(ICON_FILES)
}

/// Registers all 11 built-in lint rules with the engine.
///
/// This adds rules E101-E102, W101-W104, and C201-C205, with their default
/// options.
pub fn register_builtin_rules(engine: &mut LintEngine) {
    engine.register(Box::new(JsxElementComponentMismatch));
    engine.register(Box::new(UiNodePropAsComponent));
    engine.register(Box::new(NoNestedTernary));
    engine.register(Box::new(NoInlineObjectProps::default()));
    engine.register(Box::new(NoInlineFunctionProps::default()));
    engine.register(Box::new(NoEmptyCatch));
    engine.register(Box::new(OneComponentPerFile));
    engine.register(Box::new(BooleanNaming::default()));
    engine.register(Box::new(SvgCurrentColor::default()));
    engine.register(Box::new(MemoizedExport::default()));
    engine.register(Box::new(NoJsxInServices::default()));
}
