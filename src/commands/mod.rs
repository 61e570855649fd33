pub mod doctor;
pub mod download;
pub mod init;
pub mod preview;
pub mod run;
