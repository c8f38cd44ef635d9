// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
#[allow(dead_code)]
pub fn generate_answer(points: usize) -> String {
    let mut answer = String::from("There are several things to consider here:\n\n");
    for i in 1..=points {
        answer.push_str(&format!("{i}. Point number {i} with a short explanation\n"));
        answer.push_str("   a. first detail\n   b. second detail\n\n");
    }
    answer
}
