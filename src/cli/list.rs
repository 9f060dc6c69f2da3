use nestloop::Demo;

pub fn cmd_list() {
    for demo in Demo::ALL {
        println!("  {:<12} {}", demo.name(), demo.summary());
    }
}
