//! A loaded project: the TOML file plus everything resolved from it.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use tracing::info;

use lumpr_calendar::OutputSchedule;
use lumpr_deck::{DeckOptions, template_label, write_deck, write_irrigation_file, write_lumprep};
use lumpr_model::ModelConfig;

use crate::config::LumprConfig;
use crate::convert;

pub struct Project {
    pub config: LumprConfig,
    pub schedule: OutputSchedule,
    pub models: Vec<ModelConfig>,
}

impl Project {
    /// Reads the project file and resolves the schedule and every model.
    pub fn load(path: &Path, workspace: Option<PathBuf>) -> Result<Self> {
        let toml_str = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        let mut config: LumprConfig =
            toml::from_str(&toml_str).context("failed to parse TOML config")?;
        if let Some(dir) = workspace {
            config.workspace = dir;
        }

        let schedule = convert::build_schedule(&config.simulation)?;
        let mut seen = HashSet::new();
        let mut models = Vec::with_capacity(config.models.len());
        for m in &config.models {
            if !seen.insert(m.name.as_str()) {
                bail!("model '{}' defined more than once", m.name);
            }
            models.push(convert::build_model_config(m, &config.workspace)?);
        }
        info!(
            n_models = models.len(),
            num_days = schedule.num_days(),
            n_out = schedule.len(),
            "project loaded"
        );
        Ok(Self {
            config,
            schedule,
            models,
        })
    }

    pub fn workspace(&self) -> &Path {
        &self.config.workspace
    }

    /// Writes every model's deck and template.
    ///
    /// Fails before writing anything if two models would share a template
    /// parameter label.
    pub fn write_decks(&self) -> Result<()> {
        let options = self
            .config
            .models
            .iter()
            .map(|toml| convert::build_deck_options(toml, &self.config))
            .collect::<Result<Vec<_>>>()?;
        check_template_labels(&self.models, &options)?;
        for (model, options) in self.models.iter().zip(&options) {
            write_deck(model, &self.schedule, options)
                .with_context(|| format!("failed to write deck for model '{}'", model.name()))?;
        }
        Ok(())
    }

    /// Writes the irrigation schedule of every model that has one.
    pub fn write_irrigation(&self) -> Result<()> {
        for toml in &self.config.models {
            let Some(ref irrigation) = toml.irrigation else {
                continue;
            };
            let events =
                convert::build_irrigation(irrigation, &self.config.simulation, &self.schedule)
                    .with_context(|| format!("invalid irrigation for model '{}'", toml.name))?;
            fs::create_dir_all(self.workspace()).with_context(|| {
                format!("failed to create workspace {}", self.workspace().display())
            })?;
            let path = self
                .workspace()
                .join(convert::irrigation_file_name(irrigation, &toml.name));
            write_irrigation_file(&path, &events)?;
        }
        Ok(())
    }

    /// Writes the LUMPREP input file and returns its name.
    pub fn write_lumprep(&self) -> Result<Option<String>> {
        let Some(ref lumprep) = self.config.lumprep else {
            return Ok(None);
        };
        let input =
            convert::build_lumprep_input(lumprep, &self.config.simulation, &self.schedule)?;
        write_lumprep(&self.workspace().join(&lumprep.file), &input, &self.models)?;
        Ok(Some(lumprep.file.clone()))
    }

    /// Writes the lr2series input file and returns its name.
    pub fn write_bridge(&self) -> Result<Option<String>> {
        let Some(ref bridge) = self.config.bridge else {
            return Ok(None);
        };
        let file = convert::build_bridge(bridge, &self.models)?;
        file.write(&self.workspace().join(&bridge.file))?;
        Ok(Some(bridge.file.clone()))
    }
}

/// Labels keep only the first characters of a model name, so distinct
/// models can collide.
fn check_template_labels(models: &[ModelConfig], options: &[DeckOptions]) -> Result<()> {
    let mut owners: HashMap<String, &str> = HashMap::new();
    for (model, options) in models.iter().zip(options) {
        let Some(spec) = options.template() else {
            continue;
        };
        for field in spec.fields() {
            for param in field.param_names() {
                let label = template_label(param, model.name());
                match owners.get(label.as_str()) {
                    Some(&other) if other != model.name() => bail!(
                        "template label '{label}' is shared by models '{other}' and '{}'; \
                         model names must differ in their first characters",
                        model.name()
                    ),
                    Some(_) => {}
                    None => {
                        owners.insert(label, model.name());
                    }
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_project(dir: &Path, body: &str) -> PathBuf {
        let path = dir.join("lumpr.toml");
        fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn duplicate_models_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_project(
            dir.path(),
            "[simulation]\nnum_days = 10\nnday_out = 2\n[[model]]\nname = \"a\"\n[[model]]\nname = \"a\"\n",
        );
        let err = Project::load(&path, None).err().unwrap();
        assert!(format!("{err:#}").contains("more than once"));
    }

    #[test]
    fn clashing_template_labels_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let ws = dir.path().join("ws");
        let path = write_project(
            dir.path(),
            "[simulation]\nnum_days = 10\nnday_out = 2\n\
             [[model]]\nname = \"catchment01\"\ntemplate = [\"ks\"]\n\
             [[model]]\nname = \"catchment02\"\ntemplate = [\"ks\"]\n",
        );
        let project = Project::load(&path, Some(ws.clone())).unwrap();
        let err = project.write_decks().unwrap_err();
        assert!(format!("{err:#}").contains("ks_catchme"), "{err:#}");
        assert!(!ws.join("lr_catchment01.in").exists());
    }

    #[test]
    fn distinct_template_labels_written() {
        let dir = tempfile::tempdir().unwrap();
        let ws = dir.path().join("ws");
        let path = write_project(
            dir.path(),
            "[simulation]\nnum_days = 10\nnday_out = 2\n\
             [[model]]\nname = \"north\"\ntemplate = [\"ks\"]\n\
             [[model]]\nname = \"south\"\ntemplate = [\"ks\"]\n",
        );
        let project = Project::load(&path, Some(ws.clone())).unwrap();
        project.write_decks().unwrap();
        assert!(ws.join("lr_north.tpl").exists());
        assert!(ws.join("lr_south.tpl").exists());
    }

    #[test]
    fn workspace_override() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_project(
            dir.path(),
            "[simulation]\nnum_days = 10\nnday_out = 2\n[[model]]\nname = \"a\"\n",
        );
        let ws = dir.path().join("ws");
        let project = Project::load(&path, Some(ws.clone())).unwrap();
        assert_eq!(project.models[0].workspace(), ws.as_path());
        project.write_decks().unwrap();
        assert!(ws.join("lr_a.in").exists());
        assert_eq!(project.write_lumprep().unwrap(), None);
    }
}
