use std::{path::Path, time::Duration};

use actix_web::{dev::Server, http::KeepAlive, middleware::Logger, web, App, HttpServer};
use enrollment_engine::{
    db::memory::{default_events, load_seed_file},
    db_types::{CatalogKind, Event},
    Catalogs,
    CheckoutFlowApi,
    EnquiryApi,
    InMemoryCatalog,
};
use log::*;

use crate::{
    checkout_routes::{CompleteCheckoutRoute, StartCheckoutRoute},
    config::{ServerConfig, ServerOptions, WidgetSettings},
    errors::ServerError,
    integrations::{RazorpayGateway, SheetsLedger},
    routes::{
        health,
        sitemap,
        CatalogRoute,
        CreateOrderRoute,
        SaveToSheetRoute,
        SubmitEnquiryRoute,
        VerifyPaymentRoute,
    },
    sitemap::Sitemap,
};

/// The backends a running server is wired up with.
#[derive(Clone)]
pub struct Backends {
    pub events: InMemoryCatalog,
    pub workshops: InMemoryCatalog,
    pub gateway: RazorpayGateway,
    pub registrations: SheetsLedger,
    pub enquiries: SheetsLedger,
}

impl Backends {
    pub fn from_config(config: &ServerConfig) -> Result<Self, ServerError> {
        let events = load_catalog(CatalogKind::Events, config.events_seed_file.as_deref(), default_events)?;
        let workshops = load_catalog(CatalogKind::Workshops, config.workshops_seed_file.as_deref(), Vec::new)?;
        let gateway =
            RazorpayGateway::new(config.razorpay.clone()).map_err(|e| ServerError::InitializeError(e.to_string()))?;
        let registrations = SheetsLedger::new(config.registrations_sheet.clone())
            .map_err(|e| ServerError::InitializeError(e.to_string()))?;
        let enquiries =
            SheetsLedger::new(config.enquiries_sheet.clone()).map_err(|e| ServerError::InitializeError(e.to_string()))?;
        Ok(Self { events, workshops, gateway, registrations, enquiries })
    }
}

fn load_catalog(
    kind: CatalogKind,
    seed_file: Option<&Path>,
    built_in: fn() -> Vec<Event>,
) -> Result<InMemoryCatalog, ServerError> {
    let events = match seed_file {
        Some(path) => load_seed_file(path).map_err(|e| {
            ServerError::InitializeError(format!("Could not load {kind} from {}. {e}", path.display()))
        })?,
        None => built_in(),
    };
    info!("📚️ Loaded {} {kind} listing(s)", events.len());
    Ok(InMemoryCatalog::with_events(events))
}

pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    let backends = Backends::from_config(&config)?;
    let srv = create_server_instance(config, backends)?;
    srv.await.map_err(|e| ServerError::Unspecified(e.to_string()))
}

pub fn create_server_instance(config: ServerConfig, backends: Backends) -> Result<Server, ServerError> {
    let options = ServerOptions::from_config(&config);
    let widget = WidgetSettings::from_config(&config);
    let site_map = Sitemap::new(&config.site_url);
    let admin_key = config.admin_api_key.clone();
    let srv = HttpServer::new(move || {
        let Backends { events, workshops, gateway, registrations, enquiries } = backends.clone();
        let catalogs = Catalogs::new(events, workshops);
        let checkout_api = CheckoutFlowApi::new(gateway, registrations);
        let enquiry_api = EnquiryApi::new(enquiries);
        let api_scope = web::scope("/api")
            .service(CatalogRoute::<InMemoryCatalog>::new(CatalogKind::Events, admin_key.clone()))
            .service(CatalogRoute::<InMemoryCatalog>::new(CatalogKind::Workshops, admin_key.clone()))
            .service(CreateOrderRoute::<RazorpayGateway, SheetsLedger>::new())
            .service(VerifyPaymentRoute::<RazorpayGateway, SheetsLedger>::new())
            .service(SaveToSheetRoute::<RazorpayGateway, SheetsLedger>::new())
            .service(SubmitEnquiryRoute::<SheetsLedger>::new())
            .service(StartCheckoutRoute::<RazorpayGateway, SheetsLedger>::new())
            .service(CompleteCheckoutRoute::<RazorpayGateway, SheetsLedger>::new());
        App::new()
            .wrap(Logger::new("%t (%D ms) %s %a %{Host}i %U").log_target("ldg::access_log"))
            .app_data(web::Data::new(catalogs))
            .app_data(web::Data::new(checkout_api))
            .app_data(web::Data::new(enquiry_api))
            .app_data(web::Data::new(options))
            .app_data(web::Data::new(widget.clone()))
            .app_data(web::Data::new(site_map.clone()))
            .service(health)
            .service(sitemap)
            .service(api_scope)
    })
    .keep_alive(KeepAlive::Timeout(Duration::from_secs(600)))
    .bind((config.host.as_str(), config.port))?
    .run();
    Ok(srv)
}
