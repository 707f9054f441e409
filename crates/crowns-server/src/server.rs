use std::io::Read;
use std::net::SocketAddr;
use std::sync::Arc;
use std::thread;

use anyhow::{Context, Result, anyhow};
use tiny_http::{Header, Request, Response, Server, StatusCode};

use crate::service::{AdviceService, ServiceResponse};

/// Fixed pool of worker threads pulling from one shared listener.
pub struct AdviceServer {
    server: Arc<Server>,
    service: Arc<AdviceService>,
    workers: usize,
}

impl AdviceServer {
    pub fn bind(addr: &str, service: AdviceService, workers: usize) -> Result<Self> {
        let server = Server::http(addr).map_err(|err| anyhow!("binding {addr}: {err}"))?;
        Ok(Self {
            server: Arc::new(server),
            service: Arc::new(service),
            workers: workers.max(1),
        })
    }

    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.server.server_addr().to_ip()
    }

    /// Serves until the listener shuts down.
    pub fn run(self) -> Result<()> {
        let handles = (0..self.workers)
            .map(|worker| {
                let server = Arc::clone(&self.server);
                let service = Arc::clone(&self.service);
                thread::Builder::new()
                    .name(format!("crowns-worker-{worker}"))
                    .spawn(move || worker_loop(worker, &server, &service))
                    .with_context(|| format!("spawning worker {worker}"))
            })
            .collect::<Result<Vec<_>>>()?;

        for handle in handles {
            if handle.join().is_err() {
                tracing::error!(target: "crowns_server::http", "worker thread panicked");
            }
        }
        Ok(())
    }
}

fn worker_loop(worker: usize, server: &Server, service: &AdviceService) {
    loop {
        match server.recv() {
            Ok(request) => {
                if let Err(err) = handle_request(request, service) {
                    tracing::warn!(
                        target: "crowns_server::http",
                        worker,
                        error = %err,
                        "failed to answer request"
                    );
                }
            }
            Err(err) => {
                tracing::info!(
                    target: "crowns_server::http",
                    worker,
                    error = %err,
                    "listener closed"
                );
                break;
            }
        }
    }
}

fn handle_request(mut request: Request, service: &AdviceService) -> std::io::Result<()> {
    let mut body = Vec::new();
    if let Err(err) = request.as_reader().read_to_end(&mut body) {
        tracing::warn!(target: "crowns_server::http", error = %err, "unreadable request body");
        return request.respond(Response::empty(StatusCode(400)));
    }

    let method = request.method().to_string();
    let url = request.url().to_string();
    let reply = service.handle(&method, &url, &body);
    respond(request, reply)
}

fn respond(request: Request, reply: ServiceResponse) -> std::io::Result<()> {
    let mut response = Response::from_data(reply.body).with_status_code(StatusCode(reply.status));
    if let Ok(header) = Header::from_bytes(&b"Content-Type"[..], reply.content_type.as_bytes()) {
        response = response.with_header(header);
    }
    request.respond(response)
}
