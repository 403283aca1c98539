//! Course management screen

use super::{DeleteOutcome, SaveError};
use crate::components::{Banner, Pagination, Table};
use skillup_client::{ApiClient, ApiResult};
use skillup_protocol::{Confirmation, CourseForm, DeleteConfirmation, fallback};
use skillup_types::{Course, CourseAction, Page, PageRequest, SortDirection};
use std::fmt;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Column the course list is sorted by
pub const SORT_BY: &str = "createdAt";

/// Course management screen state
#[derive(Debug, Clone)]
pub struct CoursesPage {
    /// Cards currently shown
    pub courses: Vec<Course>,
    /// Footer position
    pub pagination: Pagination,
    /// Search term applied to the last load
    pub search: String,
    /// Categories offered by the create form
    pub categories: Vec<String>,
    /// Banner after a failed load or action
    pub banner: Option<Banner>,
    page_size: u32,
    confirm: DeleteConfirmation<String>,
}

impl CoursesPage {
    /// Empty screen with `page_size` cards per page and a delete window
    #[must_use]
    pub fn new(page_size: u32, delete_window: Duration) -> Self {
        Self {
            courses: Vec::new(),
            pagination: Pagination::of(&Page::<Course>::empty(page_size), page_size),
            search: String::new(),
            categories: Vec::new(),
            banner: None,
            page_size,
            confirm: DeleteConfirmation::new(delete_window),
        }
    }

    /// Cards per page
    #[must_use]
    pub const fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Load page `index`, newest first, honoring the current search term
    pub async fn load(&mut self, client: &ApiClient, index: u32) {
        self.banner = None;
        let result = if self.search.is_empty() {
            let request = PageRequest::new(i64::from(index), i64::from(self.page_size()));
            client
                .list_courses(request, SORT_BY, SortDirection::Desc)
                .await
        } else {
            client.search_courses(&self.search).await.map(Page::single)
        };

        match result {
            Ok(page) => {
                self.pagination = Pagination::of(&page, self.page_size());
                self.courses = page.content;
            }
            Err(e) => {
                warn!(error = %e, "courses unavailable, showing demo data");
                self.banner = Some(Banner::from_error(&e));
                let page = Page::single(fallback::demo_courses());
                self.pagination = Pagination::of(&page, self.page_size());
                self.courses = page.content;
            }
        }
    }

    /// Load the create form's categories, falling back to the built-in list
    pub async fn load_categories(&mut self, client: &ApiClient) {
        self.categories = match client.categories().await {
            Ok(categories) if !categories.is_empty() => categories,
            Ok(_) => fallback::default_categories(),
            Err(e) => {
                debug!(error = %e, "using default categories");
                fallback::default_categories()
            }
        };
    }

    /// Search by keyword from the first page
    pub async fn search(&mut self, client: &ApiClient, keyword: &str) {
        keyword.trim().clone_into(&mut self.search);
        self.load(client, 0).await;
    }

    /// Move to page `index` if it exists
    pub async fn go_to(&mut self, client: &ApiClient, index: u32) {
        if index < self.pagination.total_pages.max(1) {
            self.load(client, index).await;
        }
    }

    /// Create a course and put it first
    ///
    /// # Errors
    ///
    /// Returns the form errors or the backend error; the list is unchanged.
    pub async fn create(&mut self, client: &ApiClient, form: &CourseForm) -> Result<Course, SaveError> {
        let request = form.check()?;
        let course = client.create_course(&request).await?;
        info!(course_id = %course.id, "course created");
        self.courses.insert(0, course.clone());
        Ok(course)
    }

    /// Set the featured flag
    ///
    /// # Errors
    ///
    /// Returns the backend error; the card is unchanged.
    pub async fn set_featured(&mut self, client: &ApiClient, course_id: &str, featured: bool) -> ApiResult<()> {
        self.apply(client, course_id, CourseAction::featured(featured)).await
    }

    /// Set the active flag
    ///
    /// # Errors
    ///
    /// Returns the backend error; the card is unchanged.
    pub async fn set_active(&mut self, client: &ApiClient, course_id: &str, active: bool) -> ApiResult<()> {
        self.apply(client, course_id, CourseAction::active(active)).await
    }

    async fn apply(&mut self, client: &ApiClient, course_id: &str, action: CourseAction) -> ApiResult<()> {
        match client.set_course_flag(course_id, action).await {
            Ok(_) => {
                if let Some(course) = self.courses.iter_mut().find(|c| c.id == course_id) {
                    course.apply(action);
                }
                info!(course_id, action = action.path_segment(), "course updated");
                Ok(())
            }
            Err(e) => {
                self.banner = Some(Banner::from_error(&e));
                Err(e)
            }
        }
    }

    /// Ask to delete `course_id`; the second request within the window deletes
    ///
    /// # Errors
    ///
    /// Returns the backend error; the card stays and a banner is shown.
    pub async fn request_delete(
        &mut self,
        client: &ApiClient,
        course_id: &str,
        now: Instant,
    ) -> ApiResult<DeleteOutcome> {
        if self.confirm.request(course_id.to_string(), now) == Confirmation::Armed {
            debug!(course_id, "delete armed");
            return Ok(DeleteOutcome::Armed);
        }

        match client.delete_course(course_id).await {
            Ok(()) => {
                self.courses.retain(|c| c.id != course_id);
                Ok(DeleteOutcome::Deleted)
            }
            Err(e) => {
                self.banner = Some(Banner::from_error(&e));
                Err(e)
            }
        }
    }
}

impl fmt::Display for CoursesPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Course Management")?;
        if let Some(banner) = &self.banner {
            writeln!(f, "{banner}")?;
        }
        if !self.search.is_empty() {
            writeln!(f, "Search: {}", self.search)?;
        }
        writeln!(f)?;

        let mut table = Table::new(&["ID", "Title", "Category", "Instructor", "Status", "Featured"]);
        for course in &self.courses {
            table.row([
                course.id.clone(),
                course.title.clone(),
                course.category.clone(),
                course.instructor_name().to_string(),
                if course.is_active { "Active" } else { "Inactive" }.to_string(),
                if course.is_featured { "yes" } else { "" }.to_string(),
            ]);
        }
        write!(f, "{table}")?;
        if self.courses.is_empty() {
            writeln!(f, "No courses found")?;
        }
        writeln!(f, "{}", self.pagination)
    }
}
