fn main() {
    pokerbot::cli::run();
}
