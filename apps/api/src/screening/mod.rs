// The resume-evaluation pipeline: extraction → prompt → model → normalize →
// verify, fanned out per resume by the batch orchestrator. All model calls go
// through llm_client — no direct endpoint calls here.

pub mod batch;
pub mod extract;
pub mod handlers;
pub mod jd;
pub mod json_extract;
pub mod normalize;
pub mod prompts;
pub mod tone;
pub mod verify;
pub mod weights;
