pub mod provider_router;
pub mod router_factory;
