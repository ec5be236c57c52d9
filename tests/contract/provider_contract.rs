use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll, RawWaker, RawWakerVTable, Waker};

use chainquote_core::{
    Credentials, Deployment, DeploymentId, EndpointStyle, HttpAuth, HttpClient, HttpError,
    HttpRequest, HttpResponse, PriceAdapter, ResponseShape, Symbol,
};
use serde_json::{Map, Value};

/// Answers with a price for every table address, in the deployment's shape.
struct EchoHttpClient {
    body: String,
    requests: Mutex<Vec<HttpRequest>>,
}

impl EchoHttpClient {
    fn for_deployment(deployment: &Deployment) -> Arc<Self> {
        let body = deployment
            .tokens
            .iter()
            .enumerate()
            .map(|(index, (_, address))| {
                let price = format!("{}.500000000", index + 1);
                let value = match &deployment.response_shape {
                    ResponseShape::Flat => Value::String(price),
                    ResponseShape::Field { name } => {
                        let mut entry = Map::new();
                        entry.insert(name.clone(), Value::String(price));
                        Value::Object(entry)
                    }
                };
                (address.as_str().to_uppercase().replacen("0X", "0x", 1), value)
            })
            .collect::<Map<String, Value>>();

        Arc::new(Self {
            body: Value::Object(body).to_string(),
            requests: Mutex::new(Vec::new()),
        })
    }

    fn requests(&self) -> Vec<HttpRequest> {
        self.requests
            .lock()
            .expect("request store should not be poisoned")
            .clone()
    }
}

impl HttpClient for EchoHttpClient {
    fn execute<'a>(
        &'a self,
        request: HttpRequest,
    ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>> {
        self.requests
            .lock()
            .expect("request store should not be poisoned")
            .push(request);
        let response = HttpResponse::ok_json(self.body.clone());
        Box::pin(async move { Ok(response) })
    }
}

fn credentials() -> Credentials {
    Credentials {
        oneinch_token: String::from("inch"),
        arken_username: String::from("desk"),
        arken_token: String::from("arken"),
    }
}

fn deployments() -> Vec<Deployment> {
    DeploymentId::ALL
        .iter()
        .map(|&id| Deployment::builtin(id, &credentials()).expect("built-in deployment"))
        .collect()
}

fn table_symbols(deployment: &Deployment) -> Vec<Symbol> {
    deployment
        .tokens
        .iter()
        .map(|(symbol, _)| symbol.clone())
        .collect()
}

#[test]
fn every_table_symbol_resolves_for_all_deployments() {
    for deployment in deployments() {
        let client = EchoHttpClient::for_deployment(&deployment);
        let adapter = PriceAdapter::new(deployment.clone(), client.clone());
        let symbols = table_symbols(&deployment);

        let line = block_on(adapter.prices(&symbols)).unwrap_or_else(|error| {
            panic!("deployment '{}' failed: {error}", deployment.name)
        });

        assert_eq!(line.len(), symbols.len(), "deployment '{}'", deployment.name);
        assert_eq!(
            line.resolved(),
            symbols.len(),
            "deployment '{}': every table symbol should be priced",
            deployment.name
        );
        let expected = (1..=symbols.len())
            .map(|n| format!("{n}.5"))
            .collect::<Vec<_>>()
            .join(",");
        assert_eq!(line.to_string(), expected, "deployment '{}'", deployment.name);
        assert_eq!(client.requests().len(), 1, "deployment '{}'", deployment.name);
    }
}

#[test]
fn requests_target_the_deployment_chain_and_endpoint() {
    for deployment in deployments() {
        let client = EchoHttpClient::for_deployment(&deployment);
        let adapter = PriceAdapter::new(deployment.clone(), client.clone());

        block_on(adapter.prices(&table_symbols(&deployment))).expect("prices should resolve");

        let request = &client.requests()[0];
        let base = deployment.endpoint_url();
        assert!(
            request.url.starts_with(&base),
            "deployment '{}': {} should start with {base}",
            deployment.name,
            request.url
        );
        assert!(base.contains(&format!("/{}", deployment.chain_id)));
        match &deployment.endpoint {
            EndpointStyle::PathSegment => {
                assert!(request.url.starts_with(&format!("{base}/0x")));
            }
            EndpointStyle::QueryParameter { name } => {
                assert!(request.url.starts_with(&format!("{base}?{name}=0x")));
            }
        }
        assert_eq!(request.timeout_ms, deployment.timeout_ms);
    }
}

#[test]
fn requests_carry_the_deployment_auth_headers() {
    for deployment in deployments() {
        let client = EchoHttpClient::for_deployment(&deployment);
        let adapter = PriceAdapter::new(deployment.clone(), client.clone());

        block_on(adapter.prices(&table_symbols(&deployment))).expect("prices should resolve");

        let request = &client.requests()[0];
        match &deployment.auth {
            HttpAuth::BearerToken { .. } => {
                assert_eq!(
                    request.headers.get("authorization").map(String::as_str),
                    Some("Bearer inch")
                );
            }
            HttpAuth::Headers { .. } => {
                assert_eq!(
                    request.headers.get("x-api-username").map(String::as_str),
                    Some("desk")
                );
                assert_eq!(
                    request.headers.get("x-api-token").map(String::as_str),
                    Some("arken")
                );
            }
            other => panic!("unexpected auth for '{}': {other:?}", deployment.name),
        }
    }
}

#[test]
fn native_eth_prices_on_every_ethereum_deployment() {
    for id in [DeploymentId::OneinchEth, DeploymentId::ArkenEth] {
        let deployment = Deployment::builtin(id, &credentials()).expect("built-in deployment");
        let client = EchoHttpClient::for_deployment(&deployment);
        let adapter = PriceAdapter::new(deployment, client);

        let line = block_on(adapter.prices(&[Symbol::new("ETH")]))
            .unwrap_or_else(|error| panic!("deployment '{id}' failed: {error}"));

        assert_eq!(line.resolved(), 1, "deployment '{id}' should price ETH");
    }
}

#[test]
fn bsc_deployments_leave_ethereum_only_tokens_unpriced() {
    for id in [DeploymentId::OneinchBsc, DeploymentId::ArkenBsc] {
        let deployment = Deployment::builtin(id, &credentials()).expect("built-in deployment");
        let client = EchoHttpClient::for_deployment(&deployment);
        let adapter = PriceAdapter::new(deployment, client);

        let line = block_on(adapter.prices(&[Symbol::new("WBTC"), Symbol::new("BETH")]))
            .unwrap_or_else(|error| panic!("deployment '{id}' failed: {error}"));

        assert_eq!(line.to_string(), "-,1.5", "deployment '{id}'");
    }
}

fn block_on<F>(future: F) -> F::Output
where
    F: Future,
{
    let waker = noop_waker();
    let mut context = Context::from_waker(&waker);
    let mut future = std::pin::pin!(future);

    loop {
        match future.as_mut().poll(&mut context) {
            Poll::Ready(output) => return output,
            Poll::Pending => std::thread::yield_now(),
        }
    }
}

fn noop_waker() -> Waker {
    // SAFETY: The vtable functions never dereference the data pointer and are no-op operations.
    unsafe { Waker::from_raw(noop_raw_waker()) }
}

fn noop_raw_waker() -> RawWaker {
    RawWaker::new(std::ptr::null(), &NOOP_RAW_WAKER_VTABLE)
}

unsafe fn noop_raw_waker_clone(_: *const ()) -> RawWaker {
    noop_raw_waker()
}

unsafe fn noop_raw_waker_wake(_: *const ()) {}

unsafe fn noop_raw_waker_wake_by_ref(_: *const ()) {}

unsafe fn noop_raw_waker_drop(_: *const ()) {}

static NOOP_RAW_WAKER_VTABLE: RawWakerVTable = RawWakerVTable::new(
    noop_raw_waker_clone,
    noop_raw_waker_wake,
    noop_raw_waker_wake_by_ref,
    noop_raw_waker_drop,
);
