pub mod google_maps_service;
