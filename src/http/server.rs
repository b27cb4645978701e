use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;

use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use tokio::net::{TcpListener, TcpStream};
use tracing::{error, info};

use super::{Request, Response, Router};

/// HTTP server: accept loop plus per-connection tasks.
pub struct HttpServer {
	router: Arc<Router>,
}

impl HttpServer {
	pub fn new(router: Router) -> Self {
		Self {
			router: Arc::new(router),
		}
	}

	/// Starts the server and accepts connections until an error occurs.
	pub async fn listen(self, addr: SocketAddr) -> Result<(), Box<dyn std::error::Error>> {
		let listener = TcpListener::bind(addr).await?;
		info!("listening on http://{addr}");

		loop {
			let (stream, _) = listener.accept().await?;
			let router = self.router.clone();
			tokio::task::spawn(async move {
				if let Err(err) = Self::handle_connection(stream, router).await {
					error!("connection error: {err:?}");
				}
			});
		}
	}

	async fn handle_connection(
		stream: TcpStream,
		router: Arc<Router>,
	) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
		let io = TokioIo::new(stream);
		http1::Builder::new()
			.serve_connection(
				io,
				service_fn(move |req| {
					let router = router.clone();
					async move { Ok::<_, Infallible>(Self::serve(router, req).await) }
				}),
			)
			.await?;
		Ok(())
	}

	async fn serve(router: Arc<Router>, req: hyper::Request<Incoming>) -> hyper::Response<Full<Bytes>> {
		let (parts, body) = req.into_parts();
		let body = match body.collect().await {
			Ok(collected) => collected.to_bytes(),
			Err(_) => {
				let err = crate::error::Error::InvalidArgument("unreadable body".to_string());
				return Self::encode(Response::from_error(&err));
			}
		};

		let request = Request::new(parts.method.clone(), parts.uri.clone(), parts.headers, body);
		let response = match router.dispatch(request).await {
			Ok(response) => response,
			Err(err) => Response::from_error(&err),
		};
		info!(
			method = %parts.method,
			path = %parts.uri.path(),
			status = %response.status,
			"request"
		);
		Self::encode(response)
	}

	fn encode(response: Response) -> hyper::Response<Full<Bytes>> {
		let mut builder = hyper::Response::builder().status(response.status);
		if let Some(headers) = builder.headers_mut() {
			*headers = response.headers;
		}
		builder
			.body(Full::new(response.body))
			.unwrap_or_else(|_| hyper::Response::new(Full::new(Bytes::new())))
	}
}
