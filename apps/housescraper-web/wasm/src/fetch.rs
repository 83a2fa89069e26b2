//! `fetch`-backed transport for the scrape form

use futures::future::LocalBoxFuture;
use js_sys::Promise;
use scrape_client_core::{FormPayload, RequestFailure, Transport};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{FormData, Request, RequestInit, Response};

/// POSTs the payload as `multipart/form-data` through `window.fetch`.
///
/// The browser picks the boundary and sets the content type. No extra
/// headers are sent and the response status is not checked.
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchTransport;

impl Transport for FetchTransport {
    fn post_form(
        &self,
        path: &str,
        payload: FormPayload,
    ) -> LocalBoxFuture<'static, Result<String, RequestFailure>> {
        // Issue the request now so it goes out before the listener returns.
        let pending = send(path, &payload);

        Box::pin(async move {
            let response = JsFuture::from(pending?).await.map_err(network_failure)?;
            let response: Response = response.dyn_into().map_err(network_failure)?;

            let text = response.text().map_err(decode_failure)?;
            let body = JsFuture::from(text).await.map_err(decode_failure)?;
            body.as_string()
                .ok_or_else(|| RequestFailure::Decode("Response body is not text".to_string()))
        })
    }
}

fn send(path: &str, payload: &FormPayload) -> Result<Promise, RequestFailure> {
    let window = web_sys::window().ok_or_else(|| RequestFailure::Network("No window".to_string()))?;
    let body = to_form_data(payload).map_err(network_failure)?;

    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_body(&body);

    let request = Request::new_with_str_and_init(path, &opts).map_err(network_failure)?;
    Ok(window.fetch_with_request(&request))
}

fn to_form_data(payload: &FormPayload) -> Result<FormData, JsValue> {
    let data = FormData::new()?;
    for (name, value) in payload.iter() {
        data.append_with_str(name, value)?;
    }
    Ok(data)
}

fn network_failure(err: JsValue) -> RequestFailure {
    RequestFailure::Network(describe(&err))
}

fn decode_failure(err: JsValue) -> RequestFailure {
    RequestFailure::Decode(describe(&err))
}

fn describe(err: &JsValue) -> String {
    if let Some(error) = err.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }
    err.as_string().unwrap_or_else(|| format!("{:?}", err))
}

#[cfg(target_arch = "wasm32")]
mod wasm_tests {
    use super::*;
    use js_sys::Reflect;
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    /// Replaces `window.fetch` for the lifetime of the value
    struct FetchStub {
        requests: Rc<RefCell<Vec<Request>>>,
        _handler: Closure<dyn FnMut(Request) -> Promise>,
    }

    impl FetchStub {
        fn install(reply: impl Fn() -> Promise + 'static) -> Self {
            let window = web_sys::window().unwrap();
            let requests = Rc::new(RefCell::new(Vec::new()));

            let seen = Rc::clone(&requests);
            let handler = Closure::<dyn FnMut(Request) -> Promise>::new(move |request: Request| {
                seen.borrow_mut().push(request);
                reply()
            });
            Reflect::set(&window, &"fetch".into(), handler.as_ref()).unwrap();

            Self {
                requests,
                _handler: handler,
            }
        }

        fn requests(&self) -> Vec<Request> {
            self.requests.borrow().clone()
        }
    }

    impl Drop for FetchStub {
        fn drop(&mut self) {
            // Deleting the own property exposes `Window.prototype.fetch` again.
            if let Some(window) = web_sys::window() {
                let _ = Reflect::delete_property(&window, &"fetch".into());
            }
        }
    }

    fn json_reply(body: &'static str) -> impl Fn() -> Promise {
        move || Promise::resolve(&Response::new_with_opt_str(Some(body)).unwrap())
    }

    #[wasm_bindgen_test]
    fn test_form_data_mirrors_payload() {
        let payload: FormPayload = vec![("a", "1"), ("b", "2"), ("a", "3")].into_iter().collect();
        let data = to_form_data(&payload).unwrap();

        assert_eq!(data.get("b").as_string().as_deref(), Some("2"));
        assert_eq!(data.get_all("a").length(), 2);
    }

    #[wasm_bindgen_test]
    fn test_describe_js_error() {
        let err: JsValue = js_sys::Error::new("Failed to fetch").into();
        assert_eq!(describe(&err), "Failed to fetch");
        assert_eq!(describe(&JsValue::from_str("offline")), "offline");
    }

    #[wasm_bindgen_test]
    async fn test_post_form_sends_one_multipart_post() {
        let stub = FetchStub::install(json_reply(r#"{"status":"ok"}"#));
        let payload: FormPayload = vec![("a", "1"), ("b", "2")].into_iter().collect();

        let body = FetchTransport.post_form("/scrape", payload).await.unwrap();
        assert_eq!(body, r#"{"status":"ok"}"#);

        let requests = stub.requests();
        assert_eq!(requests.len(), 1);
        let request = &requests[0];
        assert_eq!(request.method(), "POST");
        assert!(request.url().ends_with("/scrape"));

        let content_type = request.headers().get("content-type").unwrap().unwrap_or_default();
        assert!(content_type.starts_with("multipart/form-data"));

        let sent = JsFuture::from(request.form_data().unwrap()).await.unwrap();
        let sent: FormData = sent.unchecked_into();
        assert_eq!(sent.get("a").as_string().as_deref(), Some("1"));
        assert_eq!(sent.get("b").as_string().as_deref(), Some("2"));
    }

    #[wasm_bindgen_test]
    async fn test_request_goes_out_before_awaiting() {
        let stub = FetchStub::install(json_reply("{}"));

        let pending = FetchTransport.post_form("/api/scrape", FormPayload::new());
        assert_eq!(stub.requests().len(), 1);
        assert!(stub.requests()[0].url().ends_with("/api/scrape"));

        pending.await.unwrap();
    }

    #[wasm_bindgen_test]
    async fn test_rejected_fetch_is_network_failure() {
        let _stub = FetchStub::install(|| {
            Promise::reject(&js_sys::Error::new("Failed to fetch").into())
        });

        let err = FetchTransport
            .post_form("/scrape", FormPayload::new())
            .await
            .unwrap_err();
        assert_eq!(err, RequestFailure::Network("Failed to fetch".to_string()));
    }

    #[wasm_bindgen_test]
    async fn test_unreadable_body_is_decode_failure() {
        let _stub = FetchStub::install(|| {
            let response = Response::new_with_opt_str(Some("{}")).unwrap();
            // Locks the body so the transport's own read is rejected.
            let _ = response.text();
            Promise::resolve(&response)
        });

        let err = FetchTransport
            .post_form("/scrape", FormPayload::new())
            .await
            .unwrap_err();
        assert!(matches!(err, RequestFailure::Decode(_)));
    }
}
