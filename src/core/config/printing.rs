use crate::core::config::data::Config;

impl Config {
    pub fn print_all(&self) {
        println!("Current configuration:");
        match &self.default_model {
            Some(model) => println!("  default-model: {model}"),
            None => println!("  default-model: (unset, using {})", self.model()),
        }
        match self.temperature {
            Some(temperature) => println!("  temperature: {temperature}"),
            None => println!("  temperature: (unset, using {})", self.temperature()),
        }
        match &self.base_url {
            Some(url) => println!("  base-url: {url}"),
            None => println!("  base-url: (unset)"),
        }
        match self.max_turns() {
            Some(turns) => println!("  max-turns: {turns}"),
            None => println!("  max-turns: unlimited"),
        }
        match self.request_timeout_secs {
            Some(secs) if secs > 0 => println!("  request-timeout: {secs}s"),
            _ => println!("  request-timeout: none"),
        }
        match &self.system_prompt {
            Some(_) => println!("  system-prompt: custom"),
            None => println!("  system-prompt: built-in"),
        }
    }
}
