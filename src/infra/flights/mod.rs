pub mod aviationstack_service;
