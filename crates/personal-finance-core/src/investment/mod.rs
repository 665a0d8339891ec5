pub mod fd;
pub mod sip;
pub mod swp;
