// Pipeline phases of one automoc run
//
// Classification always runs. Generation reads the remaining manifest
// sections only when something is stale. The aggregate and re-trigger phases
// consult the failure flag latched by generation.

#[path = "01_classify.rs"]
pub mod classify;
#[path = "02_generate.rs"]
pub mod generate;
#[path = "03_aggregate.rs"]
pub mod aggregate;
#[path = "04_retrigger.rs"]
pub mod retrigger;
