use may_minihttp::Response;
use serde_json::Value;

use crate::respond::HttpResponse;

pub(crate) fn status_reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        201 => "Created",
        204 => "No Content",
        302 => "Found",
        400 => "Bad Request",
        401 => "Unauthorized",
        404 => "Not Found",
        415 => "Unsupported Media Type",
        500 => "Internal Server Error",
        _ => "OK",
    }
}

/// Write a pipeline-produced [`HttpResponse`] to the wire.
pub fn write_response(res: &mut Response, response: &HttpResponse) {
    res.status_code(response.status as usize, status_reason(response.status));
    for (name, value) in &response.headers {
        let header = format!("{name}: {value}").into_boxed_str();
        res.header(Box::leak(header));
    }
    res.body_vec(response.body.clone().into_bytes());
}

/// Write a JSON body with the supplied status.
pub fn write_json(res: &mut Response, status: u16, body: Value) {
    res.status_code(status as usize, status_reason(status));
    res.header("Content-Type: application/json");
    res.body_vec(body.to_string().into_bytes());
}

/// Write a bodyless response with the supplied status.
pub fn write_empty(res: &mut Response, status: u16) {
    res.status_code(status as usize, status_reason(status));
    res.body_vec(Vec::new());
}
