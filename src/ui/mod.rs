pub(crate) mod report;
pub(crate) mod theme;
pub(crate) mod util;
