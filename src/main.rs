fn main() {
    if let Err(error) = timeinput::run() {
        eprintln!("timeinput: {error}");
        std::process::exit(1);
    }
}
