//! Parameter-driven controller that keeps a [`ComparisonView`] in sync with the
//! user's station and variable choices.

use crate::error::SeasontologyError;
use crate::seasontology::Seasontology;
use crate::types::snapshot::DailySnapshot;
use crate::types::variable::Variable;
use crate::view::comparison::ComparisonView;
use log::debug;

/// The three user-facing parameters of the dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardParams {
    pub station_one: String,
    pub station_two: String,
    pub variable: Variable,
}

impl Default for DashboardParams {
    fn default() -> Self {
        Self {
            station_one: "CMI".to_string(),
            station_two: "MRY".to_string(),
            variable: Variable::default(),
        }
    }
}

/// A single parameter edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamChange {
    StationOne(String),
    StationTwo(String),
    Variable(Variable),
}

/// Holds the current parameters, the loaded snapshots and the last built view.
///
/// A station change reloads both snapshots before rebuilding; a variable change
/// rebuilds from the snapshots already held.
///
/// # Example
///
/// ```no_run
/// use seasontology::{ParamChange, Seasontology, Variable};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), seasontology::SeasontologyError> {
/// let client = Seasontology::new().await?;
/// let mut dashboard = client.dashboard();
/// dashboard.render().await?;
///
/// let view = dashboard
///     .event([ParamChange::Variable(Variable::PrecipIn)])
///     .await?;
/// println!("{} panels for {}", view.panels.len(), view.variable);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Dashboard<'a> {
    client: &'a Seasontology,
    params: DashboardParams,
    snapshots: Vec<DailySnapshot>,
    view: Option<ComparisonView>,
    snapshot_loads: usize,
}

impl<'a> Dashboard<'a> {
    pub fn new(client: &'a Seasontology, params: DashboardParams) -> Self {
        Self {
            client,
            params,
            snapshots: Vec::new(),
            view: None,
            snapshot_loads: 0,
        }
    }

    pub fn params(&self) -> &DashboardParams {
        &self.params
    }

    /// The last built view, if any.
    pub fn view(&self) -> Option<&ComparisonView> {
        self.view.as_ref()
    }

    /// How many times the station snapshots have been (re)loaded.
    pub fn snapshot_loads(&self) -> usize {
        self.snapshot_loads
    }

    /// Loads both stations and builds the view from scratch.
    pub async fn render(&mut self) -> Result<&ComparisonView, SeasontologyError> {
        self.reload(self.params.clone()).await
    }

    /// Applies parameter edits and regenerates the view.
    ///
    /// The edits only take effect if the view can be regenerated; on error the
    /// parameters, snapshots and view are left as they were.
    pub async fn event(
        &mut self,
        changes: impl IntoIterator<Item = ParamChange>,
    ) -> Result<&ComparisonView, SeasontologyError> {
        let mut params = self.params.clone();
        for change in changes {
            match change {
                ParamChange::StationOne(station) => params.station_one = station,
                ParamChange::StationTwo(station) => params.station_two = station,
                ParamChange::Variable(variable) => params.variable = variable,
            }
        }

        let stations_changed = params.station_one != self.params.station_one
            || params.station_two != self.params.station_two;
        if stations_changed || self.view.is_none() {
            self.reload(params).await
        } else {
            debug!("Rebuilding view for {}", params.variable);
            let view = ComparisonView::build(&self.snapshots, params.variable)?;
            self.params = params;
            Ok(self.view.insert(view))
        }
    }

    async fn reload(
        &mut self,
        params: DashboardParams,
    ) -> Result<&ComparisonView, SeasontologyError> {
        let snapshots = vec![
            self.client.daily(&params.station_one).await?,
            self.client.daily(&params.station_two).await?,
        ];
        let view = ComparisonView::build(&snapshots, params.variable)?;

        self.snapshots = snapshots;
        self.params = params;
        self.snapshot_loads += 1;
        Ok(self.view.insert(view))
    }
}
