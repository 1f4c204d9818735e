//! Selection handling for the terminal front end.

use std::io::{self, BufRead, Write};
use std::time::Duration;

use jma_core::{AppError, ForecastError};
use jma_ui::{AppServices, ForecastModel, RegionModel};

use crate::cli::{parse_selection, Selection};

/// Grace period on top of the HTTP timeout before a fetch counts as lost.
const RESPONSE_GRACE_SECS: u64 = 5;

/// How long to wait for a fetch given the configured HTTP timeout.
pub fn response_wait(timeout_secs: u64) -> Duration {
    Duration::from_secs(timeout_secs.saturating_add(RESPONSE_GRACE_SECS))
}

pub struct Session<'a> {
    services: &'a AppServices,
    regions: &'a RegionModel,
    model: ForecastModel,
    wait: Duration,
    json: bool,
}

impl<'a> Session<'a> {
    pub fn new(
        services: &'a AppServices,
        regions: &'a RegionModel,
        wait: Duration,
        json: bool,
    ) -> Self {
        Self {
            services,
            regions,
            model: ForecastModel::new(services.tracker()),
            wait,
            json,
        }
    }

    /// Read one selection per line until EOF or `quit`.
    pub fn interact(&mut self, input: impl BufRead, out: &mut impl Write) -> Result<(), AppError> {
        write!(out, "> ")?;
        out.flush()?;

        for line in input.lines() {
            match parse_selection(&line?) {
                Selection::Quit => break,
                Selection::Codes(codes) if codes.is_empty() => {}
                Selection::Codes(codes) => self.show(&codes, out)?,
            }
            write!(out, "> ")?;
            out.flush()?;
        }
        writeln!(out)?;
        Ok(())
    }

    /// Request every code in order and display whichever was selected last.
    ///
    /// Unknown codes are reported and skipped.
    pub fn show(&mut self, codes: &[&str], out: &mut impl Write) -> Result<(), AppError> {
        for code in codes {
            match self.regions.select(code) {
                Ok(region) => {
                    tracing::info!("Selected region {} ({})", region.code, region.name);
                    let token = self.services.select(&region.code);
                    self.model.begin(token);
                }
                Err(e) => {
                    let e = AppError::from(e);
                    tracing::warn!("{}", e);
                    writeln!(out, "{}", e.user_message())?;
                }
            }
        }

        if !self.model.is_loading() {
            return Ok(());
        }

        while self.model.is_loading() {
            let message = self
                .services
                .recv(self.wait)
                .ok_or(ForecastError::NoResponse)?;
            self.model.apply(message);
        }

        if self.json {
            if let Some(result) = self.model.result() {
                serde_json::to_writer_pretty(&mut *out, result).map_err(io::Error::from)?;
                writeln!(out)?;
            }
        } else if let Some(panel) = self.model.panel() {
            writeln!(out, "{}", panel)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jma_core::Config;
    use serde_json::json;
    use std::io::Cursor;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const WAIT: Duration = Duration::from_secs(10);

    fn forecast(weather: &str) -> serde_json::Value {
        json!([{
            "timeSeries": [{
                "timeDefines": [
                    "2024-06-01T17:00:00+09:00",
                    "2024-06-02T00:00:00+09:00",
                    "2024-06-03T00:00:00+09:00"
                ],
                "areas": [{"weathers": [weather, weather, weather]}]
            }]
        }])
    }

    fn start_server(rt: &tokio::runtime::Runtime) -> MockServer {
        rt.block_on(async {
            let server = MockServer::start().await;

            Mock::given(method("GET"))
                .and(path("/area.json"))
                .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                    "offices": {
                        "130000": {"name": "東京都"},
                        "270000": {"name": "大阪府"}
                    }
                })))
                .mount(&server)
                .await;

            Mock::given(method("GET"))
                .and(path("/forecast/130000.json"))
                .respond_with(
                    ResponseTemplate::new(200)
                        .set_body_json(forecast("晴れ"))
                        .set_delay(Duration::from_millis(300)),
                )
                .mount(&server)
                .await;

            Mock::given(method("GET"))
                .and(path("/forecast/270000.json"))
                .respond_with(ResponseTemplate::new(200).set_body_json(forecast("雨")))
                .mount(&server)
                .await;

            server
        })
    }

    fn services_for(server: &MockServer) -> AppServices {
        let mut config = Config::default();
        config.jma.area_url = format!("{}/area.json", server.uri());
        config.jma.forecast_url_template = format!("{}/forecast/{{code}}.json", server.uri());
        config.jma.timeout_secs = 5;
        AppServices::init(&config).unwrap()
    }

    fn run_lines(input: &str, json: bool) -> String {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let server = start_server(&rt);
        let services = services_for(&server);
        let regions = RegionModel::new(services.load_regions().unwrap());

        let mut out = Vec::new();
        Session::new(&services, &regions, WAIT, json)
            .interact(Cursor::new(input.to_string()), &mut out)
            .unwrap();

        services.shutdown();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn several_codes_on_one_line_render_only_the_last() {
        let out = run_lines("130000 270000\nq\n", false);

        assert_eq!(out.matches("[270000]").count(), 1);
        assert!(out.contains("雨"));
        assert!(!out.contains("[130000]"));
        assert!(!out.contains("晴れ"));
    }

    #[test]
    fn unknown_code_is_reported_and_valid_code_still_renders() {
        let out = run_lines("999999 270000\n", false);

        let unknown = ForecastError::UnknownRegion("999999".into()).user_message();
        assert!(out.contains(unknown));
        assert!(out.contains("[270000]"));
        assert!(out.find(unknown) < out.find("[270000]"));
    }

    #[test]
    fn unknown_code_alone_renders_nothing() {
        let out = run_lines("999999\n\nquit\n130000\n", false);

        assert!(out.contains(ForecastError::UnknownRegion("999999".into()).user_message()));
        assert!(!out.contains('['));
    }

    #[test]
    fn json_output_keeps_upstream_shape() {
        let out = run_lines("270000\n", true);
        let start = out.find('[').unwrap();
        let end = out.rfind(']').unwrap();
        let value: serde_json::Value = serde_json::from_str(&out[start..=end]).unwrap();

        assert_eq!(value.as_array().map(Vec::len), Some(3));
        assert_eq!(value[0]["date"], "2024-06-01");
        assert_eq!(value[0]["weather"], "雨");
        assert_eq!(value[0]["tempMax"], "N/A");
    }

    #[test]
    fn response_wait_saturates() {
        assert_eq!(response_wait(10), Duration::from_secs(15));
        assert_eq!(response_wait(u64::MAX), Duration::from_secs(u64::MAX));
    }
}
