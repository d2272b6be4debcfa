mod context;
pub mod init;
pub mod pillars;
pub mod scan;

pub use context::{load_config, select_pillars, write_output};
pub use init::{run_init, run_init_impl};
pub use pillars::{format_pillar_list, run_pillars, run_pillars_impl};
pub use scan::{exit_code_for, run_scan, run_scan_impl};
