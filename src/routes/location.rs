use actix_web::{web, Either, HttpRequest, HttpResponse};

use crate::error::LocationError;
use crate::models::location_form::{DistanceQuery, LocationForm};
use crate::services::location_service::LocationService;

type LocationBody = Either<web::Json<LocationForm>, web::Form<LocationForm>>;

fn location_id(req: &HttpRequest) -> Option<&str> {
    req.match_info()
        .get("locationid")
        .filter(|id| !id.is_empty())
}

fn into_form(body: LocationBody) -> LocationForm {
    match body {
        Either::Left(json) => json.into_inner(),
        Either::Right(form) => form.into_inner(),
    }
}

/*
    GET /api/locations?lng=&lat=&maxDistance=
*/
pub async fn list_by_distance(
    service: web::Data<LocationService>,
    query: web::Query<DistanceQuery>,
) -> Result<HttpResponse, LocationError> {
    let locations = service.list_by_distance(&query).await?;
    Ok(HttpResponse::Ok().json(locations))
}

/*
    POST /api/locations
*/
pub async fn create(
    service: web::Data<LocationService>,
    body: LocationBody,
) -> Result<HttpResponse, LocationError> {
    let location = service.create(into_form(body)).await?;
    Ok(HttpResponse::Created().json(location))
}

/*
    GET /api/locations/{locationid}
*/
pub async fn read_one(
    req: HttpRequest,
    service: web::Data<LocationService>,
) -> Result<HttpResponse, LocationError> {
    let location = service.read_one(location_id(&req)).await?;
    Ok(HttpResponse::Ok().json(location))
}

/*
    PUT /api/locations/{locationid}
*/
pub async fn update_one(
    req: HttpRequest,
    service: web::Data<LocationService>,
    body: LocationBody,
) -> Result<HttpResponse, LocationError> {
    let location = service
        .update_one(location_id(&req), into_form(body))
        .await?;
    Ok(HttpResponse::Ok().json(location))
}

/*
    DELETE /api/locations/{locationid}
*/
pub async fn delete_one(
    req: HttpRequest,
    service: web::Data<LocationService>,
) -> Result<HttpResponse, LocationError> {
    service.delete_one(location_id(&req)).await?;
    Ok(HttpResponse::NoContent().finish())
}
