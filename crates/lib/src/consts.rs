//! Fixed values of the setup procedure: repository locations, scratch
//! directory names, and the Ubuntu package set the build depends on.

/// Main OpenCV source repository.
pub const OPENCV_REPO: &str = "https://github.com/opencv/opencv.git";

/// Supplementary modules repository, cloned when `opencv-extra-modules` is set.
pub const OPENCV_CONTRIB_REPO: &str = "https://github.com/opencv/opencv_contrib.git";

/// Version used when the `opencv-version` input is absent.
pub const DEFAULT_VERSION: &str = "4.0.0";

/// Branch the version aliases resolve to.
pub const MASTER_BRANCH: &str = "master";

/// Scratch checkout directory for the main repository.
pub const SOURCE_DIR: &str = "opencv";

/// Scratch checkout directory for the extra-modules repository.
pub const CONTRIB_DIR: &str = "opencv_contrib";

/// CMake build directory inside the main checkout.
pub const BUILD_DIR: &str = "opencv/build";

/// Path handed to `-D OPENCV_EXTRA_MODULES_PATH` when extra modules are built.
pub const CONTRIB_MODULES_PATH: &str = "./opencv_contrib/modules";

/// Parallel jobs for the compile step.
pub const MAKE_JOBS: &str = "-j10";

/// Package repository added before installing build dependencies.
pub const SECURITY_REPO: &str = "deb http://security.ubuntu.com/ubuntu xenial-security main";

/// Packages removed before the install; they conflict with the codec
/// packages pulled in below.
pub const CONFLICTING_PACKAGES: &[&str] = &["x264", "libx264-dev"];

/// Build and runtime dependencies installed by the bootstrap step.
pub const APT_PACKAGES: &[&str] = &[
  "build-essential",
  "checkinstall",
  "git",
  "cmake",
  "pkg-config",
  "yasm",
  "gfortran",
  "libjpeg8-dev",
  "libjasper1",
  "libjasper-dev",
  "libpng-dev",
  "libavcodec-dev",
  "libavformat-dev",
  "libswscale-dev",
  "libdc1394-22-dev",
  "libxine2-dev",
  "libv4l-dev",
  "libgstreamer1.0-dev",
  "libgstreamer-plugins-base1.0-dev",
  "qt5-default",
  "libgtk2.0-dev",
  "libtbb-dev",
  "libatlas-base-dev",
  "libfaac-dev",
  "libmp3lame-dev",
  "libtheora-dev",
  "libvorbis-dev",
  "libxvidcore-dev",
  "libopencore-amrnb-dev",
  "libopencore-amrwb-dev",
  "libtbb2",
  "libtiff-dev",
  "python-dev",
  "python-numpy",
  "x264",
  "v4l-utils",
];
