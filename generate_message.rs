use watermark_payload::utils::{bytes_to_binary, bytes_to_hex};

fn main() {
    let message = watermark_payload::generate_random(&mut rand::thread_rng());
    let bytes = message.bytes();

    let numeric: Vec<String> = bytes.iter().map(|b| b.to_string()).collect();
    println!("Numeric: {}", numeric.join(","));
    println!("Binary:  {}", bytes_to_binary(&bytes, true));
    println!("Hex:     {}", bytes_to_hex(&bytes));
}
