pub mod camera_server;
pub mod dry_run;
pub mod network_state;
pub mod startup;
