fn main() {
    car_vignette::game::run();
}
