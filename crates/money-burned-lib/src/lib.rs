pub mod data_structures;
pub mod error;
pub mod parser;
pub mod recorder;
pub mod units;

pub use data_structures::{Cost, Resource, ResourceRegistry, GENERIC_RESOURCE_NAME};
pub use error::{CostError, InvalidCostExpression, SessionError};
pub use parser::{CostParser, ResourceListOutcome};
pub use recorder::{RecordingSession, SessionState};
pub use units::{CostUnit, UnitTable};

pub use chrono::{DateTime, Duration, Utc};

pub mod prelude {
    pub use crate::data_structures::{Cost, Resource, ResourceRegistry};
    pub use crate::parser::{CostParser, ResourceListOutcome};
    pub use crate::recorder::{RecordingSession, SessionState};
    pub use crate::units::{CostUnit, UnitTable};
    pub use chrono::{DateTime, Utc};
}
