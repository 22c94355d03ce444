use std::io;

use actix_web::{App, HttpServer, web};

use habitloop::db::establish_connection_pool;
use habitloop::models::config::ServerConfig;
use habitloop::routes::{habits, social, users};

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let server_config: ServerConfig = config::Config::builder()
        .add_source(config::File::with_name("habitloop").required(false))
        .add_source(config::Environment::default())
        .build()
        .and_then(config::Config::try_deserialize)
        .map_err(io::Error::other)?;

    let pool = establish_connection_pool(&server_config.database_url).map_err(io::Error::other)?;

    let bind_address = server_config.bind_address.clone();
    let pool = web::Data::new(pool);
    let server_config = web::Data::new(server_config);

    log::info!("Starting Habitloop server at {bind_address}");

    HttpServer::new(move || {
        App::new()
            .app_data(pool.clone())
            .app_data(server_config.clone())
            .service(
                web::scope("/api/habits")
                    .service(habits::list_habits)
                    .service(habits::create_habit)
                    .service(habits::complete_habit)
                    .service(habits::habit_stats)
                    .service(habits::get_habit)
                    .service(habits::update_habit)
                    .service(habits::delete_habit),
            )
            .service(
                web::scope("/api/social")
                    .service(social::search_users)
                    .service(social::follow_user)
                    .service(social::unfollow_user)
                    .service(social::following)
                    .service(social::followers)
                    .service(social::activity_feed),
            )
            .service(web::scope("/api/users").service(users::user_profile))
    })
    .bind(bind_address)?
    .run()
    .await
}
