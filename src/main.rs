//src/main.rs

use axum::{
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, post, put},
    Router,
};
use tokio::net::TcpListener;
use tower_http::services::ServeDir;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod middleware;
mod models;
mod services;

use crate::config::AppState;
use crate::middleware::auth::auth_guard;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_target(false).compact().init();

    // .expect() é bom aqui: se a configuração falhar, a aplicação não deve iniciar.
    let app_state = AppState::new()
        .await
        .expect("Falha ao inicializar o estado da aplicação.");

    // Roda as migrações do SQLx na inicialização
    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Falha ao rodar as migrações do banco de dados.");

    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    // Rotas de autenticação (login é público, /me exige token)
    let auth_routes = Router::new()
        .route("/login", post(handlers::auth::login))
        .route(
            "/me",
            get(handlers::auth::get_me).layer(axum_middleware::from_fn_with_state(
                app_state.clone(),
                auth_guard,
            )),
        );

    // Cadastros: unidades e funcionários
    let registry_routes = Router::new()
        .route(
            "/units",
            get(handlers::units::list_units).post(handlers::units::create_unit),
        )
        .route("/units/{id}", put(handlers::units::update_unit))
        .route(
            "/units/{id}/employees",
            get(handlers::employees::list_unit_employees),
        )
        .route("/employees", post(handlers::employees::create_employee))
        .route(
            "/employees/{id}",
            put(handlers::employees::update_employee).delete(handlers::employees::delete_employee),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Usuários (o guard de admin fica no extractor dos handlers)
    let user_routes = Router::new()
        .route(
            "/",
            get(handlers::users::list_users).post(handlers::users::create_user),
        )
        .route("/{id}", put(handlers::users::update_user))
        .route("/{id}/deactivate", post(handlers::users::deactivate_user))
        .route("/{id}/activate", post(handlers::users::activate_user))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Folha de frequência mensal
    let frequency_routes = Router::new()
        .route("/sheet", get(handlers::frequency::load_sheet))
        .route(
            "/sheet/previous",
            get(handlers::frequency::load_previous_sheet),
        )
        .route("/draft", post(handlers::frequency::save_draft))
        .route("/finalize", post(handlers::frequency::finalize))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Códigos de evento
    let event_code_routes = Router::new()
        .route(
            "/event-codes",
            get(handlers::event_codes::list_event_codes)
                .put(handlers::event_codes::update_event_codes),
        )
        .route("/event-types", get(handlers::event_codes::list_event_types))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Exportação de documentos
    let document_routes = Router::new()
        .route(
            "/frequency-sheet/{unit_id}/{month}/{year}",
            get(handlers::documents::frequency_sheet_pdf),
        )
        .route(
            "/frequency-sheet/{unit_id}/{month}/{year}/html",
            get(handlers::documents::frequency_sheet_html),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Configurações da organização. O limite de corpo fica acima dos 2MB da
    // logo para a checagem de tamanho do serviço ser quem responde 400.
    let settings_routes = Router::new()
        .route("/organization", get(handlers::settings::get_organization))
        .route(
            "/logo",
            post(handlers::settings::upload_logo).delete(handlers::settings::remove_logo),
        )
        .layer(DefaultBodyLimit::max(3 * 1024 * 1024))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Painel administrativo
    let dashboard_routes = Router::new()
        .route("/summary", get(handlers::dashboard::get_summary))
        .route("/units-status", get(handlers::dashboard::get_units_status))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Bootstrap: sem autenticação, servem para levantar um banco vazio
    let admin_routes = Router::new()
        .route("/database-status", get(handlers::admin::database_status))
        .route("/seed", post(handlers::admin::seed))
        .route("/test-user", post(handlers::admin::test_user));

    // Combina tudo no router principal
    let app = Router::new()
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", docs::ApiDoc::openapi()))
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/auth", auth_routes)
        .nest("/api", registry_routes)
        .nest("/api/users", user_routes)
        .nest("/api/frequency", frequency_routes)
        .nest("/api", event_code_routes)
        .nest("/api/documents", document_routes)
        .nest("/api/settings", settings_routes)
        .nest("/api/dashboard", dashboard_routes)
        .nest("/api/admin", admin_routes)
        .nest_service("/uploads", ServeDir::new(app_state.uploads_dir.clone()))
        .with_state(app_state);

    // Inicia o servidor
    let addr = "0.0.0.0:3000";
    let listener = TcpListener::bind(addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr().unwrap());
    axum::serve(listener, app).await.expect("Erro no servidor Axum");
}
