pub mod header;
pub mod modality_picker;
pub mod results;
pub mod status_badge;
pub mod upload_section;
pub mod utils;
