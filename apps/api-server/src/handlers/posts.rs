//! Post endpoints.

use actix_multipart::Multipart;
use actix_web::{HttpResponse, web};

use blog_core::domain::{CreatePost, EditPost, Post, PostId};
use blog_shared::MessageResponse;
use blog_shared::dto::{DeletePostQuery, PostResponse};

use super::form::PostForm;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn to_response(post: Post) -> PostResponse {
    PostResponse {
        id: post.id,
        titulo: post.titulo,
        contenido: post.contenido,
        imagen: post.imagen,
        fecha: post.fecha,
    }
}

fn parse_id(raw: &str) -> AppResult<PostId> {
    raw.trim()
        .parse()
        .map_err(|_| AppError::BadRequest("Identificador de post inválido".to_string()))
}

/// GET /posts
pub async fn list_posts(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts = state.posts.list().await?;
    let body: Vec<PostResponse> = posts.into_iter().map(to_response).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// POST /nuevoPost - multipart: titulo, contenido, imagen (file)
pub async fn create_post(
    state: web::Data<AppState>,
    payload: Multipart,
) -> AppResult<HttpResponse> {
    let mut form = PostForm::read(payload, state.max_upload_bytes).await?;

    let input = CreatePost {
        titulo: form.take_text("titulo"),
        contenido: form.take_text("contenido"),
        imagen: form.take_image(),
    };

    state
        .posts
        .create(input)
        .await
        .map_err(|e| AppError::from(e).with_internal_message("Error en el servidor"))?;

    Ok(HttpResponse::Ok().json(MessageResponse::new("Publicación realizada")))
}

/// GET /post/{id}
pub async fn get_post(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = parse_id(&path)?;
    let post = state.posts.get(id).await?;
    Ok(HttpResponse::Ok().json(to_response(post)))
}

/// DELETE /delete/{id}?imagen=<stored name>
pub async fn delete_post(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<DeletePostQuery>,
) -> AppResult<HttpResponse> {
    let id = parse_id(&path)?;
    state.posts.delete(id, query.imagen.as_deref()).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new("Post borrado")))
}

/// PUT /postEdited/{id} - multipart: titulo, contenido, imagenAnterior, imagen (optional file)
pub async fn update_post(
    state: web::Data<AppState>,
    path: web::Path<String>,
    payload: Multipart,
) -> AppResult<HttpResponse> {
    let id = parse_id(&path)?;
    let mut form = PostForm::read(payload, state.max_upload_bytes).await?;

    let input = EditPost {
        titulo: form.take_text("titulo"),
        contenido: form.take_text("contenido"),
        imagen_anterior: form.take_text("imagenAnterior"),
        imagen: form.take_image(),
    };

    state
        .posts
        .update(id, input)
        .await
        .map_err(|e| AppError::from(e).with_internal_message("Error al actualizar el post"))?;

    Ok(HttpResponse::Ok().json(MessageResponse::new("Post actualizado con éxito")))
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use blog_core::service::ImagePolicy;
    use serde_json::Value;

    use super::*;
    use crate::handlers::configure_routes;

    const BOUNDARY: &str = "----blogtestboundary";

    enum Part<'a> {
        Text(&'a str, &'a str),
        File(&'a str, &'a str, &'a [u8]),
    }

    fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
        let mut body = Vec::new();
        for part in parts {
            body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
            match part {
                Part::Text(name, value) => {
                    body.extend_from_slice(
                        format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n")
                            .as_bytes(),
                    );
                    body.extend_from_slice(value.as_bytes());
                }
                Part::File(name, filename, bytes) => {
                    body.extend_from_slice(
                        format!(
                            "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\n\
                             Content-Type: application/octet-stream\r\n\r\n"
                        )
                        .as_bytes(),
                    );
                    body.extend_from_slice(bytes);
                }
            }
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        body
    }

    fn multipart_request(method: &str, uri: &str, parts: &[Part<'_>]) -> test::TestRequest {
        let req = match method {
            "PUT" => test::TestRequest::put(),
            _ => test::TestRequest::post(),
        };
        req.uri(uri)
            .insert_header((
                "content-type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            ))
            .set_payload(multipart_body(parts))
    }

    fn state(policy: ImagePolicy) -> AppState {
        AppState::in_memory(policy, 1024 * 1024)
    }

    macro_rules! app {
        ($state:expr) => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new($state.clone()))
                    .configure(configure_routes),
            )
            .await
        };
    }

    macro_rules! list {
        ($app:expr) => {{
            let req = test::TestRequest::get().uri("/posts").to_request();
            let body: Value = test::call_and_read_body_json($app, req).await;
            body.as_array().cloned().unwrap_or_default()
        }};
    }

    #[actix_web::test]
    async fn test_create_then_list() {
        let state = state(ImagePolicy::Required);
        let app = app!(state);

        let req = multipart_request(
            "POST",
            "/nuevoPost",
            &[
                Part::Text("titulo", "Hi"),
                Part::Text("contenido", "World"),
                Part::File("imagen", "a.png", b"\x89PNG"),
            ],
        )
        .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body, serde_json::json!({ "message": "Publicación realizada" }));

        let posts = list!(&app);
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0]["titulo"], "Hi");
        assert!(posts[0]["imagen"].as_str().unwrap().ends_with("a.png"));
    }

    #[actix_web::test]
    async fn test_create_missing_fields_is_bad_request() {
        let state = state(ImagePolicy::Required);
        let app = app!(state);

        let cases: [&[Part<'_>]; 3] = [
            &[
                Part::Text("titulo", ""),
                Part::Text("contenido", "World"),
                Part::File("imagen", "a.png", b"x"),
            ],
            &[
                Part::Text("titulo", "Hi"),
                Part::File("imagen", "a.png", b"x"),
            ],
            &[
                Part::Text("titulo", "Hi"),
                Part::Text("contenido", "World"),
                Part::File("imagen", "", b""),
            ],
        ];

        for parts in cases {
            let req = multipart_request("POST", "/nuevoPost", parts).to_request();
            let res = test::call_service(&app, req).await;
            assert_eq!(res.status(), StatusCode::BAD_REQUEST);
            let body: Value = test::read_body_json(res).await;
            assert_eq!(body["message"], "Faltan datos obligatorios");
        }

        assert!(list!(&app).is_empty());
    }

    #[actix_web::test]
    async fn test_lenient_create_without_image() {
        let state = state(ImagePolicy::Optional);
        let app = app!(state);

        let req = multipart_request(
            "POST",
            "/nuevoPost",
            &[Part::Text("titulo", "Hi"), Part::Text("contenido", "World")],
        )
        .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);

        let posts = list!(&app);
        assert!(posts[0]["imagen"].is_null());
    }

    #[actix_web::test]
    async fn test_get_post_and_not_found() {
        let state = state(ImagePolicy::Required);
        let app = app!(state);

        let req = multipart_request(
            "POST",
            "/nuevoPost",
            &[
                Part::Text("titulo", "Hi"),
                Part::Text("contenido", "World"),
                Part::File("imagen", "a.png", b"x"),
            ],
        )
        .to_request();
        test::call_service(&app, req).await;
        let id = list!(&app)[0]["id"].as_i64().unwrap();

        let req = test::TestRequest::get()
            .uri(&format!("/post/{id}"))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["contenido"], "World");

        let req = test::TestRequest::get().uri("/post/999").to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["message"], "Post no encontrado");

        let req = test::TestRequest::get().uri("/post/abc").to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_delete_post_and_image() {
        let state = state(ImagePolicy::Required);
        let app = app!(state);

        let req = multipart_request(
            "POST",
            "/nuevoPost",
            &[
                Part::Text("titulo", "Hi"),
                Part::Text("contenido", "World"),
                Part::File("imagen", "a.png", b"x"),
            ],
        )
        .to_request();
        test::call_service(&app, req).await;
        let post = list!(&app).remove(0);
        let imagen = post["imagen"].as_str().unwrap().to_string();
        assert!(state.posts.images().contains(&imagen).await);

        let req = test::TestRequest::delete()
            .uri(&format!("/delete/{}?imagen={}", post["id"], imagen))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["message"], "Post borrado");

        assert!(list!(&app).is_empty());
        assert!(!state.posts.images().contains(&imagen).await);
    }

    #[actix_web::test]
    async fn test_delete_missing_post_is_ok() {
        let state = state(ImagePolicy::Required);
        let app = app!(state);

        let req = test::TestRequest::delete()
            .uri("/delete/12345?imagen=missing.png")
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_update_replaces_image() {
        let state = state(ImagePolicy::Required);
        let app = app!(state);

        let req = multipart_request(
            "POST",
            "/nuevoPost",
            &[
                Part::Text("titulo", "Hi"),
                Part::Text("contenido", "World"),
                Part::File("imagen", "a.png", b"old"),
            ],
        )
        .to_request();
        test::call_service(&app, req).await;
        let post = list!(&app).remove(0);
        let old = post["imagen"].as_str().unwrap().to_string();

        let req = multipart_request(
            "PUT",
            &format!("/postEdited/{}", post["id"]),
            &[
                Part::Text("titulo", "Hola"),
                Part::Text("contenido", "Mundo"),
                Part::Text("imagenAnterior", &old),
                Part::File("imagen", "b.png", b"new"),
            ],
        )
        .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["message"], "Post actualizado con éxito");

        let updated = list!(&app).remove(0);
        let new = updated["imagen"].as_str().unwrap();
        assert_eq!(updated["titulo"], "Hola");
        assert!(new.ends_with("b.png"));
        assert!(state.posts.images().contains(new).await);
        assert!(!state.posts.images().contains(&old).await);
    }

    #[actix_web::test]
    async fn test_update_without_image_keeps_previous() {
        let state = state(ImagePolicy::Required);
        let app = app!(state);

        let req = multipart_request(
            "POST",
            "/nuevoPost",
            &[
                Part::Text("titulo", "Hi"),
                Part::Text("contenido", "World"),
                Part::File("imagen", "a.png", b"old"),
            ],
        )
        .to_request();
        test::call_service(&app, req).await;
        let post = list!(&app).remove(0);
        let old = post["imagen"].as_str().unwrap().to_string();

        let req = multipart_request(
            "PUT",
            &format!("/postEdited/{}", post["id"]),
            &[
                Part::Text("titulo", "Hi"),
                Part::Text("contenido", "Editado"),
                Part::Text("imagenAnterior", &old),
            ],
        )
        .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);

        let updated = list!(&app).remove(0);
        assert_eq!(updated["contenido"], "Editado");
        assert_eq!(updated["imagen"], old.as_str());
        assert!(state.posts.images().contains(&old).await);
    }

    #[actix_web::test]
    async fn test_update_missing_post_is_not_found() {
        let state = state(ImagePolicy::Required);
        let app = app!(state);

        let req = multipart_request(
            "PUT",
            "/postEdited/77",
            &[
                Part::Text("titulo", "Hi"),
                Part::Text("contenido", "World"),
                Part::File("imagen", "b.png", b"new"),
            ],
        )
        .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["error"], "Post no encontrado");
        assert_eq!(body["message"], "Post no encontrado");

        assert!(list!(&app).is_empty());
    }

    #[actix_web::test]
    async fn test_oversized_upload_is_rejected() {
        let state = AppState::in_memory(ImagePolicy::Required, 16);
        let app = app!(state);

        let req = multipart_request(
            "POST",
            "/nuevoPost",
            &[
                Part::Text("titulo", "Hi"),
                Part::Text("contenido", "World"),
                Part::File("imagen", "a.png", &[0u8; 64]),
            ],
        )
        .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert!(list!(&app).is_empty());
    }
}
