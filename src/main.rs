fn main() {
    ur_solver::cli::run();
}
