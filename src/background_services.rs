pub mod iss_updater;
