use configs::ServiceKind;

fn main() -> std::process::ExitCode {
    server::bootstrap::run(ServiceKind::Orders)
}
