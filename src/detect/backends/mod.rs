pub mod recorded;
pub mod stub;

pub use recorded::RecordedVisionService;
pub use stub::StubVisionService;
