//! Vector Tutor entry point
//!
//! On the web this exposes `WebTutor` to the page script; natively it runs a
//! line-based practice loop on stdin.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_tutor {
    use serde::Serialize;
    use wasm_bindgen::prelude::*;

    use vector_tutor::persistence::KeyValueStore;
    use vector_tutor::platform;
    use vector_tutor::tutor::{Arrow, Problem, Session};
    use vector_tutor::{ConceptKey, Settings};

    fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, JsValue> {
        serde_json::to_string(value).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// What the page needs to show a problem (the answer stays on this side)
    #[derive(Serialize)]
    struct ProblemView<'a> {
        concept: ConceptKey,
        prompt: &'a str,
        arrows: Vec<Arrow>,
    }

    /// Tutor handle owned by the page
    #[wasm_bindgen]
    pub struct WebTutor {
        session: Session,
        store: Box<dyn KeyValueStore>,
        problem: Option<Problem>,
    }

    #[wasm_bindgen]
    impl WebTutor {
        #[wasm_bindgen(constructor)]
        pub fn new() -> WebTutor {
            let store = platform::default_store();
            let settings = Settings::load(store.as_ref());
            let session = Session::restore(store.as_ref(), platform::random_seed(), settings);
            WebTutor {
                session,
                store,
                problem: None,
            }
        }

        fn persist(&mut self) {
            if let Err(e) = self.session.persist(self.store.as_mut()) {
                log::warn!("Failed to save progress: {}", e);
            }
        }

        pub fn list_concepts(&self) -> Result<String, JsValue> {
            to_json(&self.session.list_concepts())
        }

        /// Explainer card for a concept
        pub fn explainer(&self, key: &str) -> Result<String, JsValue> {
            let key = ConceptKey::from_str(key)
                .ok_or_else(|| JsValue::from_str(&format!("unknown concept: {}", key)))?;
            to_json(vector_tutor::tutor::concept::concept(key))
        }

        /// Read-aloud text for a concept card; empty when narration is off
        pub fn narration_text(&self, key: &str) -> String {
            match ConceptKey::from_str(key) {
                Some(key) if self.session.settings.narration_enabled => {
                    let def = vector_tutor::tutor::concept::concept(key);
                    def.explainer.narration_text(def.title)
                }
                _ => String::new(),
            }
        }

        /// Replace the current problem. Errors on an unknown concept key.
        pub fn new_problem(&mut self, key: &str) -> Result<String, JsValue> {
            let problem = self
                .session
                .new_problem_named(key)
                .ok_or_else(|| JsValue::from_str(&format!("unknown concept: {}", key)))?;
            let json = to_json(&ProblemView {
                concept: problem.concept,
                prompt: &problem.prompt,
                arrows: problem.arrows(),
            })?;
            self.problem = Some(problem);
            Ok(json)
        }

        /// Check an answer to the current problem
        pub fn check_answer(&mut self, text: &str) -> Result<String, JsValue> {
            let problem = self
                .problem
                .as_ref()
                .ok_or_else(|| JsValue::from_str("no active problem"))?;
            let submission = self.session.submit(problem, text);
            self.persist();
            to_json(&submission)
        }

        /// Buy a store item by its listed name
        pub fn purchase(&mut self, name: &str) -> bool {
            let Some(item) = self.session.store_items().into_iter().find(|i| i.name == name) else {
                return false;
            };
            let success = self.session.purchase(&item.purchase).is_success();
            if success {
                self.persist();
            }
            success
        }

        pub fn store_items(&self) -> Result<String, JsValue> {
            to_json(&self.session.store_items())
        }

        pub fn status(&self) -> Result<String, JsValue> {
            to_json(&self.session.status())
        }

        pub fn settings(&self) -> Result<String, JsValue> {
            to_json(&self.session.settings)
        }

        pub fn reset_all(&mut self) {
            self.session.reset_all();
            self.persist();
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    vector_tutor::platform::init_logging();
    log::info!("Vector Tutor (web) ready");
}

#[cfg(not(target_arch = "wasm32"))]
mod cli {
    use std::io::{self, BufRead, Write};
    use std::path::PathBuf;

    use vector_tutor::persistence::KeyValueStore;
    use vector_tutor::platform;
    use vector_tutor::tutor::{CONCEPTS, Problem, Session, concept};
    use vector_tutor::{ConceptKey, Settings};

    const HELP: &str = "\
Commands:
  list          show concepts
  use <concept> switch concept (e.g. `use angle`)
  new           skip to a new problem
  explain       show the concept card
  store         list store items
  buy <item>    buy by name prefix (e.g. `buy xp`)
  stats         show level, XP, coins and accuracy
  reset         wipe all progress
  help | quit
Anything else is taken as your answer.";

    fn show_problem(problem: &Problem) {
        println!("\n[{}] {}", problem.concept.as_str(), problem.prompt);
    }

    fn save(session: &Session, store: &mut dyn KeyValueStore) {
        if let Err(e) = session.persist(store) {
            log::warn!("Failed to save progress: {}", e);
        }
    }

    fn show_stats(session: &Session) {
        let s = session.status();
        println!(
            "Level {} | XP {:.2}/{} ({:.0}%) | {} coins | streak {} | {}/{} correct ({:.0}%) | boosts +{}% XP, +{}% coins",
            s.level,
            s.xp_in_level,
            s.xp_required,
            s.progress_percent,
            s.coins,
            s.streak,
            s.correct,
            s.total,
            s.accuracy_percent,
            s.xp_boost_percent,
            s.coin_boost_percent
        );
    }

    pub fn run() -> io::Result<()> {
        let save_path = std::env::args().nth(1).map(PathBuf::from);
        let mut store = platform::default_store(save_path.as_deref());
        let settings = Settings::load(store.as_ref());
        let mut session = Session::restore(store.as_ref(), platform::random_seed(), settings);

        let mut key = CONCEPTS[0].key;
        let mut problem = session.new_problem(key);
        println!("Vector Tutor - type `help` for commands");
        show_stats(&session);
        show_problem(&problem);

        let stdin = io::stdin();
        let mut stdout = io::stdout();
        loop {
            print!("> ");
            stdout.flush()?;
            let mut line = String::new();
            if stdin.lock().read_line(&mut line)? == 0 {
                break;
            }
            let input = line.trim_end_matches(['\r', '\n']);
            let (command, arg) = match input.trim().split_once(char::is_whitespace) {
                Some((c, a)) => (c, a.trim()),
                None => (input.trim(), ""),
            };

            match command {
                "quit" | "exit" => break,
                "help" => println!("{}", HELP),
                "list" => {
                    for c in session.list_concepts() {
                        println!("  {:<10} {}", c.key.as_str(), c.title);
                    }
                }
                "use" => match ConceptKey::from_str(arg) {
                    Some(next) => {
                        key = next;
                        problem = session.new_problem(key);
                        show_problem(&problem);
                    }
                    None => println!("Unknown concept `{}` (try `list`)", arg),
                },
                "new" => {
                    problem = session.new_problem(key);
                    show_problem(&problem);
                }
                "explain" => {
                    let def = concept::concept(key);
                    let card = def.explainer;
                    println!("{}\n  {}", def.title, card.idea);
                    for (i, step) in card.steps.iter().enumerate() {
                        println!("  {}. {}", i + 1, step);
                    }
                    println!("  Formula: {}\n  Example: {}", card.formula, card.example);
                    for tip in card.pro_tips {
                        println!("  * {}", tip);
                    }
                }
                "store" => {
                    for item in session.store_items() {
                        let state = if item.owned {
                            "owned".to_string()
                        } else {
                            format!("{} coins", item.price)
                        };
                        println!("  {:<16} {:<28} {}", item.name, item.description, state);
                    }
                }
                "buy" => {
                    let wanted = arg.to_lowercase();
                    let item = session
                        .store_items()
                        .into_iter()
                        .find(|i| !wanted.is_empty() && i.name.to_lowercase().starts_with(&wanted));
                    match item {
                        Some(item) => {
                            let outcome = session.purchase(&item.purchase);
                            println!("{}: {:?}", item.name, outcome);
                            if outcome.is_success() {
                                save(&session, store.as_mut());
                            }
                        }
                        None => println!("No store item matches `{}`", arg),
                    }
                }
                "stats" => show_stats(&session),
                "reset" => {
                    session.reset_all();
                    save(&session, store.as_mut());
                    println!("Progress reset.");
                }
                _ => {
                    let submission = session.submit(&problem, input);
                    match submission.reward {
                        Some(reward) => {
                            println!("Correct! +{} coins", reward.coin_reward);
                            if let Some(level) = reward.new_level {
                                println!(
                                    "LEVEL UP! You've reached Level {} (+{} bonus coins)",
                                    level, reward.level_up_bonus
                                );
                            }
                            problem = session.new_problem(key);
                            show_problem(&problem);
                        }
                        None => println!(
                            "Not quite. Expected {}",
                            submission.check.canonical_answer
                        ),
                    }
                    save(&session, store.as_mut());
                }
            }
        }

        save(&session, store.as_mut());
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    vector_tutor::platform::init_logging();
    log::info!("Vector Tutor (native) starting...");

    if let Err(e) = cli::run() {
        log::error!("Input error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
