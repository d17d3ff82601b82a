/// The file-wide validity window, read from the constant area.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FileExtent {
    pub tfstart_file: f64,
    pub tfend_file: f64,
}
