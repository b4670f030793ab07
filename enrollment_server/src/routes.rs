//! Request handler definitions
//!
//! Catalog, order, verification and spreadsheet routes live here. The combined checkout flow has its own module,
//! [`crate::checkout_routes`].
//!
//! Every handler that talks to the gateway or a spreadsheet is async and awaits its I/O, so a slow upstream call
//! never stalls the worker thread it runs on.
use std::marker::PhantomData;

use actix_web::{
    error::JsonPayloadError,
    get,
    http::Method,
    web,
    HttpRequest,
    HttpResponse,
    Responder,
};
use chrono::Local;
use enrollment_engine::{
    db_types::{CatalogKind, EnquiryForm, EventUpdate, NewEvent, PaymentConfirmation, RegistrationRow},
    CatalogManagement,
    Catalogs,
    CheckoutFlowApi,
    EnquiryApi,
    PaymentGateway,
    RegistrantLedger,
};
use ldg_common::Secret;
use log::*;
use serde::Deserialize;

use crate::{
    config::ServerOptions,
    data_objects::{
        JsonResponse,
        OrderRequest,
        OrderResponse,
        SaveRegistrationRequest,
        VerifyRequest,
    },
    errors::ServerError,
    helpers::get_remote_ip,
    middleware::AdminKeyMiddlewareFactory,
    sitemap::Sitemap,
};

// Web-actix cannot handle generics in handlers, so it's implemented manually using the `route!` macro
#[macro_export]
macro_rules! route {
    ($name:ident => $method:ident $path:literal impl $($bounds:ty),+) => {
        paste::paste! { pub struct [<$name:camel Route>]< $( [< T $bounds:camel> ],)+ >( $( core::marker::PhantomData<fn() -> [< T $bounds:camel> ] >,)+ );}
        paste::paste! { impl< $( [< T $bounds:camel> ],)+ > [<$name:camel Route>]< $( [< T $bounds:camel> ],)+ > {
            #[allow(clippy::new_without_default)]
            pub fn new() -> Self {
                Self($( core::marker::PhantomData::<fn() -> [< T $bounds:camel> ] >,)+)
            }
        }}
        paste::paste! { impl<$( [< T $bounds:camel >] , )+> actix_web::dev::HttpServiceFactory for [<$name:camel Route>]<$([<T $bounds:camel>],)+>
        where
            $([<T $bounds:camel>]: $bounds + 'static,)+
        {
            fn register(self, config: &mut actix_web::dev::AppService) {
                let res = actix_web::Resource::new($path)
                    .name(stringify!($name))
                    .guard(actix_web::guard::$method())
                    .to($name::< $( [< T $bounds:camel >], )+>);
                actix_web::dev::HttpServiceFactory::register(res, config);
            }
        }}
    };
}

// ----------------------------------------------   Health  ----------------------------------------------------
#[get("/health")]
pub async fn health() -> impl Responder {
    trace!("💻️ Received health check request");
    HttpResponse::Ok().body("👍️\n")
}

// ----------------------------------------------   Sitemap  ----------------------------------------------------
#[get("/sitemap.xml")]
pub async fn sitemap(sitemap: web::Data<Sitemap>) -> impl Responder {
    trace!("💻️ Received sitemap request");
    let xml = sitemap.render(Local::now());
    HttpResponse::Ok().content_type("application/xml").body(xml)
}

//----------------------------------------------   Catalogs  ----------------------------------------------------
/// Registers the four catalog verbs for one catalog on a single path. Any other verb gets a 405.
///
/// GET and DELETE take the listing id from the `id` query parameter (`/api/workshops?id=3`) or from a trailing path
/// segment (`/api/workshops/3`). PUT takes it from the body. POST always issues a fresh id.
pub struct CatalogRoute<B> {
    kind: CatalogKind,
    path: &'static str,
    admin_key: Option<Secret<String>>,
    _backend: PhantomData<fn() -> B>,
}

pub const EVENTS_PATH: &str = "/adminDetail/eventdetail";
pub const WORKSHOPS_PATH: &str = "/workshops";

impl<B> CatalogRoute<B> {
    pub fn new(kind: CatalogKind, admin_key: Option<Secret<String>>) -> Self {
        let path = match kind {
            CatalogKind::Events => EVENTS_PATH,
            CatalogKind::Workshops => WORKSHOPS_PATH,
        };
        Self { kind, path, admin_key, _backend: PhantomData }
    }
}

impl<B> actix_web::dev::HttpServiceFactory for CatalogRoute<B>
where B: CatalogManagement + 'static
{
    fn register(self, config: &mut actix_web::dev::AppService) {
        for (suffix, name) in [("", "collection"), ("/{id}", "item")] {
            let res = actix_web::Resource::new(format!("{}{suffix}", self.path))
                .name(&format!("{}_{name}", self.kind))
                .app_data(web::Data::new(self.kind))
                .app_data(web::JsonConfig::default().error_handler(catalog_body_error))
                .route(web::get().to(fetch_listings::<B>))
                .route(web::post().to(create_listing::<B>))
                .route(web::put().to(update_listing::<B>))
                .route(web::delete().to(delete_listing::<B>))
                .default_service(web::to(method_not_allowed))
                .wrap(AdminKeyMiddlewareFactory::new(self.admin_key.clone()));
            actix_web::dev::HttpServiceFactory::register(res, config);
        }
    }
}

/// A PUT whose body does not name a listing by a numeric id cannot match one, so it is a 404 like any other miss.
/// Other unreadable bodies are a 400.
fn catalog_body_error(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    debug!("💻️ Could not read {} body on {}. {err}", req.method(), req.path());
    if req.method() == Method::PUT {
        ServerError::ListingNotFound.into()
    } else {
        ServerError::InvalidRequestBody(err.to_string()).into()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct IdQuery {
    pub id: Option<String>,
}

/// The listing id from the path or query string. `Ok(None)` means no id was given at all. An id that is not a number
/// cannot match any listing.
fn requested_id(req: &HttpRequest, query: &IdQuery) -> Result<Option<i64>, ServerError> {
    let raw = req.match_info().get("id").or(query.id.as_deref()).map(str::trim).filter(|s| !s.is_empty());
    match raw {
        None => Ok(None),
        Some(s) => s.parse::<i64>().map(Some).map_err(|_| {
            debug!("💻️ '{s}' is not a listing id");
            ServerError::ListingNotFound
        }),
    }
}

pub async fn fetch_listings<B: CatalogManagement>(
    req: HttpRequest,
    kind: web::Data<CatalogKind>,
    query: web::Query<IdQuery>,
    api: web::Data<Catalogs<B>>,
) -> Result<HttpResponse, ServerError> {
    let catalog = api.get(**kind);
    match requested_id(&req, &query)? {
        Some(id) => {
            debug!("💻️ GET {} listing #{id}", *kind);
            let event = catalog.fetch_by_id(id).await?;
            Ok(HttpResponse::Ok().json(event))
        },
        None => {
            debug!("💻️ GET all {} listings", *kind);
            let events = catalog.fetch_all().await?;
            Ok(HttpResponse::Ok().json(events))
        },
    }
}

pub async fn create_listing<B: CatalogManagement>(
    kind: web::Data<CatalogKind>,
    body: web::Json<NewEvent>,
    api: web::Data<Catalogs<B>>,
) -> Result<HttpResponse, ServerError> {
    debug!("💻️ POST new {} listing", *kind);
    let event = api.get(**kind).create(body.into_inner()).await?;
    Ok(HttpResponse::Created().json(event))
}

pub async fn update_listing<B: CatalogManagement>(
    kind: web::Data<CatalogKind>,
    body: web::Json<EventUpdate>,
    api: web::Data<Catalogs<B>>,
) -> Result<HttpResponse, ServerError> {
    let update = body.into_inner();
    debug!("💻️ PUT {} listing #{}", *kind, update.id);
    let event = api.get(**kind).update(update).await?;
    Ok(HttpResponse::Ok().json(event))
}

pub async fn delete_listing<B: CatalogManagement>(
    req: HttpRequest,
    kind: web::Data<CatalogKind>,
    query: web::Query<IdQuery>,
    api: web::Data<Catalogs<B>>,
) -> Result<HttpResponse, ServerError> {
    let id = requested_id(&req, &query)?.ok_or(ServerError::ListingNotFound)?;
    debug!("💻️ DELETE {} listing #{id}", *kind);
    let event = api.get(**kind).delete(id).await?;
    Ok(HttpResponse::Ok().json(event))
}

pub async fn method_not_allowed(req: HttpRequest) -> Result<HttpResponse, ServerError> {
    debug!("💻️ {} is not supported on {}", req.method(), req.path());
    Err(ServerError::MethodNotAllowed)
}

//----------------------------------------------   Orders  ----------------------------------------------------
route!(create_order => Post "/order" impl PaymentGateway, RegistrantLedger);
/// Creates a gateway order for the given amount. `amount` is in rupees; the gateway is asked for the equivalent in
/// paise.
pub async fn create_order<G, L>(
    req: HttpRequest,
    body: web::Json<OrderRequest>,
    options: web::Data<ServerOptions>,
    api: web::Data<CheckoutFlowApi<G, L>>,
) -> Result<HttpResponse, ServerError>
where
    G: PaymentGateway,
    L: RegistrantLedger,
{
    let ip = get_remote_ip(&req, options.use_x_forwarded_for, options.use_forwarded);
    debug!("💻️ POST order from {}", ip.map(|ip| ip.to_string()).unwrap_or_else(|| "unknown".into()));
    let OrderRequest { amount, currency } = body.into_inner();
    let amount = amount.to_paise().map_err(|e| ServerError::InvalidAmount(e.to_string()))?;
    let order = api.create_order(amount, &currency).await?;
    Ok(HttpResponse::Ok().json(OrderResponse {
        order_id: order.order_id,
        amount: order.amount.value(),
        currency: order.currency,
        receipt: order.receipt,
        status: order.status,
    }))
}

//----------------------------------------------   Verify  ----------------------------------------------------
route!(verify_payment => Post "/verify" impl PaymentGateway, RegistrantLedger);
/// Checks the signature that the payment widget returned against the order and payment ids.
///
/// Returns 200 with `success: true` on a match and 400 with `success: false` otherwise. A missing key secret is a
/// server configuration problem and is reported as a 500.
pub async fn verify_payment<G, L>(
    body: web::Json<VerifyRequest>,
    api: web::Data<CheckoutFlowApi<G, L>>,
) -> Result<HttpResponse, ServerError>
where
    G: PaymentGateway,
    L: RegistrantLedger,
{
    let confirmation = PaymentConfirmation::from(body.into_inner());
    debug!("💻️ POST verify for payment {} on order {}", confirmation.payment_id, confirmation.order_id);
    if api.verify_payment(&confirmation)? {
        Ok(HttpResponse::Ok().json(JsonResponse::success("Payment verified successfully.")))
    } else {
        Ok(HttpResponse::BadRequest().json(JsonResponse::failure("Payment verification failed.")))
    }
}

//----------------------------------------------   Sheets  ----------------------------------------------------
route!(save_to_sheet => Post "/saveToSheet" impl PaymentGateway, RegistrantLedger);
/// Appends a paid registration to the registrations sheet. The row is stamped with the server's local time.
pub async fn save_to_sheet<G, L>(
    body: web::Json<SaveRegistrationRequest>,
    api: web::Data<CheckoutFlowApi<G, L>>,
) -> Result<HttpResponse, ServerError>
where
    G: PaymentGateway,
    L: RegistrantLedger,
{
    let SaveRegistrationRequest { registrant, amount, payment_id, order_id } = body.into_inner();
    debug!("💻️ POST saveToSheet for payment {payment_id} on order {order_id}");
    let amount = amount.to_paise().map_err(|e| ServerError::InvalidAmount(e.to_string()))?;
    let row = RegistrationRow::new(registrant, amount.as_rupees_string(), payment_id, order_id, Local::now());
    api.save_registration(row).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "success": true })))
}

route!(submit_enquiry => Post "/googleSheets" impl RegistrantLedger);
/// Appends an enquiry form (name, contact number, stream, qualification) to the enquiries sheet.
pub async fn submit_enquiry<L: RegistrantLedger>(
    body: web::Json<EnquiryForm>,
    api: web::Data<EnquiryApi<L>>,
) -> Result<HttpResponse, ServerError> {
    let form = body.into_inner();
    debug!("💻️ POST enquiry from {}", form.name);
    api.submit(form).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "success": true })))
}
