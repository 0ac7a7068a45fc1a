pub mod energy;
pub mod lab;
pub mod meals;
pub mod mood;
pub mod questionnaire;
pub mod reference;
pub mod referral;

use crate::config::TableConfig;
use std::path::PathBuf;
use tracing::debug;
use vitals_core::builtin;
use vitals_core::error::VitalsError;
use vitals_core::questionnaire::schema::QuestionnaireDef;
use vitals_core::reference::schema::ReferenceTable;
use vitals_core::referral::ReferralTable;

// A flag wins over the environment; with neither, the builtin preset is used.

pub(crate) fn reference_table(
    flag: Option<PathBuf>,
    tables: &TableConfig,
) -> Result<ReferenceTable, VitalsError> {
    match flag.or_else(|| tables.reference.clone()) {
        Some(path) => vitals_core::reference::load_reference_table(&path),
        None => {
            debug!("using builtin reference table");
            builtin::reference_table()
        }
    }
}

pub(crate) fn questionnaire(
    flag: Option<PathBuf>,
    tables: &TableConfig,
) -> Result<QuestionnaireDef, VitalsError> {
    match flag.or_else(|| tables.questionnaire.clone()) {
        Some(path) => vitals_core::questionnaire::load_questionnaire(&path),
        None => {
            debug!("using builtin questionnaire");
            builtin::questionnaire()
        }
    }
}

pub(crate) fn referral_table(tables: &TableConfig) -> Result<ReferralTable, VitalsError> {
    match &tables.referral {
        Some(path) => vitals_core::referral::load_referral_table(path),
        None => builtin::referral_table(),
    }
}
