pub mod open_er_api;
