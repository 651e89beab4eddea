use crate::AppData;
use crate::accounts::routes::account_routes;
use crate::auth::routes::auth_routes;
use crate::clubs::routes::club_routes;
use crate::common::default_handler::default_handler;
use crate::federations::routes::federation_routes;
use crate::fixtures::routes::fixture_routes;
use crate::news::routes::news_routes;
use crate::public::routes::public_routes;
use crate::sbo::routes::sbo_routes;
use crate::teams::routes::team_routes;
use crate::venues::routes::venue_routes;
use axum::Router;

pub struct ServerRoutes;

impl ServerRoutes {
    pub fn create() -> Router<AppData> {
        Router::<AppData>::new()
            .merge(public_routes())
            .merge(auth_routes())
            .merge(account_routes())
            .merge(club_routes())
            .merge(federation_routes())
            .merge(team_routes())
            .merge(fixture_routes())
            .merge(venue_routes())
            .merge(sbo_routes())
            .merge(news_routes())
            .fallback(default_handler)
    }
}
