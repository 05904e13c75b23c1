use std::collections::HashSet;
use std::{env, io::Read};

use serde::Deserialize;
use serde_json::json;
use tiny_http::{Header, Method, Request, Response, Server};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Deserialize)]
struct VerifyPayment {
    razorpay_order_id: String,
    razorpay_payment_id: String,
    razorpay_signature: String,
    #[serde(rename = "courseId")]
    course_id: String,
}

struct Backend {
    key_id: String,
    next_order: u64,
    /// (bearer token, course id) pairs that completed verification
    purchased: HashSet<(String, String)>,
}

fn main() -> Result<(), BoxError> {
    let key_id = env::var("RAZORPAY_KEY_ID").unwrap_or_else(|_| "rzp_test_placeholder".to_string());
    let port = env::var("MOCK_COURSE_BACKEND_PORT").unwrap_or_else(|_| "2718".to_string());
    let addr = format!("127.0.0.1:{}", port);
    let server = Server::http(&addr)?;
    println!("Running on http://{}", addr);

    let mut backend = Backend {
        key_id,
        next_order: 1,
        purchased: HashSet::new(),
    };

    for mut request in server.incoming_requests() {
        let origin = header_value(&request, "Origin").unwrap_or_else(|| "*".to_string());

        // 1) Preflight
        if request.method() == &Method::Options {
            let resp = with_cors(Response::from_string("").with_status_code(204), &origin)?;
            request.respond(resp)?;
            continue;
        }

        let token = header_value(&request, "Authorization")
            .and_then(|v| v.strip_prefix("Bearer ").map(str::to_string))
            .filter(|t| !t.is_empty());
        let method = request.method().clone();
        let url = request.url().to_string();

        // 2) Routes
        let (status, body) = match (&method, token) {
            (_, None) => (401, json!({ "errors": "Unauthorized" })),
            (&Method::Post, Some(token)) if url == "/course/verify-payment" => {
                let mut raw = String::new();
                request.as_reader().read_to_string(&mut raw)?;
                backend.verify(token, &raw)
            }
            (&Method::Post, Some(token)) => match url.strip_prefix("/course/buy/") {
                Some(course_id) if !course_id.is_empty() => backend.buy(token, course_id),
                _ => (404, json!({ "errors": "Not Found" })),
            },
            _ => (404, json!({ "errors": "Not Found" })),
        };

        println!("{} {} -> {}", method, url, status);
        let resp = Response::from_string(body.to_string())
            .with_status_code(status)
            .with_header(header("Content-Type", "application/json")?);
        request.respond(with_cors(resp, &origin)?)?;
    }

    Ok(())
}

impl Backend {
    fn buy(&mut self, token: String, course_id: &str) -> (u16, serde_json::Value) {
        if self.purchased.contains(&(token, course_id.to_string())) {
            return (400, json!({ "errors": "User has already purchased this course" }));
        }
        let price = 499;
        let order_id = format!("order_mock{:06}", self.next_order);
        self.next_order += 1;
        (
            201,
            json!({
                "message": "Order created",
                "id": order_id,
                "amount": price * 100,
                "currency": "INR",
                "key": self.key_id,
                "course": { "_id": course_id, "title": format!("Course {}", course_id), "price": price }
            }),
        )
    }

    // Signatures are not checked here; a real backend compares
    // HMAC-SHA256(order_id + "|" + payment_id, key_secret) with the signature.
    fn verify(&mut self, token: String, raw: &str) -> (u16, serde_json::Value) {
        match serde_json::from_str::<VerifyPayment>(raw) {
            Ok(p) if !p.razorpay_order_id.is_empty()
                && !p.razorpay_payment_id.is_empty()
                && !p.razorpay_signature.is_empty() =>
            {
                println!("Verified {} for course {}", p.razorpay_payment_id, p.course_id);
                self.purchased.insert((token, p.course_id));
                (200, json!({ "message": "Payment verified" }))
            }
            Ok(_) => (400, json!({ "errors": "Incomplete payment receipt" })),
            Err(e) => (400, json!({ "errors": e.to_string() })),
        }
    }
}

fn header_value(request: &Request, name: &'static str) -> Option<String> {
    request
        .headers()
        .iter()
        .find(|h| h.field.equiv(name))
        .map(|h| h.value.as_str().to_string())
}

fn header(name: &str, value: &str) -> Result<Header, BoxError> {
    Header::from_bytes(name, value).map_err(|_| format!("invalid header {}", name).into())
}

fn with_cors<R: Read>(mut resp: Response<R>, origin: &str) -> Result<Response<R>, BoxError> {
    for (name, value) in [
        ("Access-Control-Allow-Origin", origin),
        ("Access-Control-Allow-Credentials", "true"),
        ("Access-Control-Allow-Methods", "POST, OPTIONS"),
        ("Access-Control-Allow-Headers", "Content-Type, Authorization"),
    ] {
        resp.add_header(header(name, value)?);
    }
    Ok(resp)
}
