pub mod cloud_vision;
