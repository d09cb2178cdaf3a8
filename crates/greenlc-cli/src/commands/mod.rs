pub mod compare;
pub mod evaluate;
pub mod reagents;
pub mod schemes;

use crate::cli::ScoringArgs;
use crate::error::Result;
use greenlc::core::models::factor::FactorTable;
use greenlc::core::models::input::ScoringInput;
use tracing::info;

/// The table reagent names resolve against: `--factors` replaces the document's rows,
/// `--profiles` rows override both, and `--builtin-factors` fills whatever is still missing
/// from the built-in table.
pub(crate) fn factor_table(input: &ScoringInput, args: &ScoringArgs) -> Result<FactorTable> {
    let base = match &args.factors {
        Some(path) => FactorTable::load(path)?,
        None => input.factor_table(),
    };
    let mut table = match &args.profiles {
        Some(path) => {
            let mut derived = FactorTable::load_profiles(path)?;
            derived.fill_missing_from(&base);
            derived
        }
        None => base,
    };
    if args.builtin_factors {
        let before = table.len();
        table.fill_missing_from(&FactorTable::builtin());
        info!(
            "Added {} built-in reagent(s) to the factor table.",
            table.len() - before
        );
    }
    Ok(table)
}
