pub mod license_server;
