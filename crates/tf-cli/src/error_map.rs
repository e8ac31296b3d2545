use tf_core::TimeforkError;

pub(crate) fn emit_error(error: TimeforkError) -> i32 {
    println!("RESULT:ERROR");
    println!("ERROR_CODE:{}", error.code);
    if let Some(line) = error.line {
        println!("ERROR_LINE:{}", line);
    }
    println!("ERROR_MSG_JSON:{}", message_json(&error.message));
    1
}

fn message_json(message: &str) -> String {
    serde_json::to_string(message).unwrap_or_else(|_| "\"\"".to_string())
}
